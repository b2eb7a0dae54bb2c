use std::collections::HashMap as StdHashMap;

use quickcheck::{quickcheck, Arbitrary, Gen};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quince::HashMap;

#[derive(Clone, Debug)]
enum Cmd {
    Insert(u8, u32),
    Remove(u8),
    Get(u8),
    Clear,
}

impl Arbitrary for Cmd {
    fn arbitrary(g: &mut Gen) -> Cmd {
        // Bias towards inserts so tables actually fill up; keep the key
        // space small so commands collide.
        match u8::arbitrary(g) % 16 {
            0..=7 => Cmd::Insert(u8::arbitrary(g) % 64, u32::arbitrary(g)),
            8..=11 => Cmd::Remove(u8::arbitrary(g) % 64),
            12..=14 => Cmd::Get(u8::arbitrary(g) % 64),
            _ => Cmd::Clear,
        }
    }
}

fn run_script(script: &[Cmd], load_factor: f32) -> bool {
    let mut map = HashMap::with_capacity_and_load_factor(0, load_factor).unwrap();
    let mut model: StdHashMap<u8, u32> = StdHashMap::new();

    for cmd in script {
        match *cmd {
            Cmd::Insert(k, v) => {
                if map.insert(k, v) != model.insert(k, v) {
                    return false;
                }
            }
            Cmd::Remove(k) => {
                if map.remove(&k) != model.remove(&k) {
                    return false;
                }
            }
            Cmd::Get(k) => {
                if map.get(&k) != model.get(&k) {
                    return false;
                }
            }
            Cmd::Clear => {
                map.clear();
                model.clear();
            }
        }

        if map.len() != model.len() {
            return false;
        }
    }

    // Full contents must agree in both directions.
    map.iter().all(|(k, v)| model.get(k) == Some(v))
        && model.iter().all(|(k, v)| map.get(k) == Some(v))
}

quickcheck! {
    fn matches_std_at_default_load_factor(script: Vec<Cmd>) -> bool {
        run_script(&script, 0.75)
    }

    fn matches_std_at_low_load_factor(script: Vec<Cmd>) -> bool {
        run_script(&script, 0.1)
    }

    fn matches_std_at_high_load_factor(script: Vec<Cmd>) -> bool {
        run_script(&script, 0.99)
    }

    fn capacity_stays_a_power_of_two(script: Vec<Cmd>) -> bool {
        let mut map = HashMap::with_capacity(0);
        for cmd in &script {
            if let Cmd::Insert(k, v) = *cmd {
                map.insert(k, v);
            }
            if !map.capacity().is_power_of_two() {
                return false;
            }
        }
        true
    }
}

#[test]
fn random_workload_matches_std() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let mut map = HashMap::with_capacity_and_load_factor(8, 0.8).unwrap();
    let mut model: StdHashMap<u16, u64> = StdHashMap::new();

    for _ in 0..100_000 {
        let key = rng.gen_range(0..2048u16);
        match rng.gen_range(0..10) {
            0..=5 => {
                let value = rng.gen();
                assert_eq!(map.insert(key, value), model.insert(key, value));
            }
            6..=8 => {
                assert_eq!(map.remove(&key), model.remove(&key));
            }
            _ => {
                assert_eq!(map.get(&key), model.get(&key));
            }
        }
    }

    assert_eq!(map.len(), model.len());
    for (k, v) in &model {
        assert_eq!(map.get(k), Some(v));
    }
}
