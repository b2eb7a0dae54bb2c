use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIZE: usize = 10_000;

#[derive(Clone, Copy)]
struct RandomKeys {
    state: usize,
}

impl RandomKeys {
    fn new() -> Self {
        RandomKeys { state: 0 }
    }
}

impl Iterator for RandomKeys {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        // Add 1 then multiply by some 32 bit prime.
        self.state = self.state.wrapping_add(1).wrapping_mul(3_787_392_781);
        Some(self.state)
    }
}

fn read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    group.bench_function("quince", |b| {
        let mut m = quince::HashMap::<usize, usize>::new();
        for i in RandomKeys::new().take(SIZE) {
            m.insert(i, i);
        }

        b.iter(|| {
            for i in RandomKeys::new().take(SIZE) {
                black_box(assert_eq!(m.get(&i), Some(&i)));
            }
        });
    });

    group.bench_function("std", |b| {
        let mut m = HashMap::<usize, usize>::default();
        for i in RandomKeys::new().take(SIZE) {
            m.insert(i, i);
        }

        b.iter(|| {
            for i in RandomKeys::new().take(SIZE) {
                black_box(assert_eq!(m.get(&i), Some(&i)));
            }
        });
    });

    group.finish();
}

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for load_factor in [0.5, 0.75, 0.9] {
        group.bench_function(format!("quince/{load_factor}"), |b| {
            b.iter(|| {
                let mut m =
                    quince::HashMap::<usize, usize>::with_capacity_and_load_factor(0, load_factor)
                        .unwrap();
                for i in RandomKeys::new().take(SIZE) {
                    m.insert(i, i);
                }
                black_box(m)
            });
        });
    }

    group.bench_function("std", |b| {
        b.iter(|| {
            let mut m = HashMap::<usize, usize>::default();
            for i in RandomKeys::new().take(SIZE) {
                m.insert(i, i);
            }
            black_box(m)
        });
    });

    group.finish();
}

criterion_group!(benches, read, insert);
criterion_main!(benches);
