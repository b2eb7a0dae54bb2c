mod probe;

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::{cmp, iter, mem, slice, vec};

use self::probe::Probe;

/// The number of buckets allocated when no capacity is requested.
pub const DEFAULT_CAPACITY: usize = 16;

/// The fill ratio that triggers growth when no load factor is requested.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// The largest bucket table the map will allocate.
pub const MAX_CAPACITY: usize = 1 << 30;

// Smallest power of two able to hold `capacity` buckets, clamped to
// `MAX_CAPACITY`. A request of zero still yields a single bucket.
pub fn capacity_for(capacity: usize) -> usize {
    cmp::max(cmp::min(capacity, MAX_CAPACITY).next_power_of_two(), 1)
}

// The occupancy at which a table of `capacity` slots rehashes.
fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    (capacity as f64 * load_factor as f64) as usize
}

// A slot in the bucket table.
//
// Removing an entry leaves a tombstone so that probe sequences which
// passed through the slot stay intact until the next rehash.
#[derive(Clone)]
enum Bucket<K, V> {
    Empty,
    Tombstone,
    Full(u64, K, V),
}

// An open-addressed hash table with power-of-two capacities.
#[derive(Clone)]
pub struct HashMap<K, V, S> {
    buckets: Box<[Bucket<K, V>]>,
    // Live entries.
    len: usize,
    // Removed slots still occupying probe sequences.
    tombstones: usize,
    // The occupancy at which the table rehashes.
    threshold: usize,
    load_factor: f32,
    build_hasher: S,
}

fn new_bucket_table<K, V>(capacity: usize) -> Box<[Bucket<K, V>]> {
    iter::repeat_with(|| Bucket::Empty).take(capacity).collect()
}

impl<K, V, S> HashMap<K, V, S> {
    // Creates a table for at least `capacity` entries. The load factor
    // must already be validated as positive and finite.
    pub fn with_capacity_and_hasher(
        capacity: usize,
        load_factor: f32,
        build_hasher: S,
    ) -> HashMap<K, V, S> {
        debug_assert!(load_factor.is_finite() && load_factor > 0.0);
        let capacity = capacity_for(capacity);

        HashMap {
            buckets: new_bucket_table(capacity),
            len: 0,
            tombstones: 0,
            threshold: threshold_for(capacity, load_factor),
            load_factor,
            build_hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }

    // Drops every entry but keeps the allocated table.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            *bucket = Bucket::Empty;
        }

        self.len = 0;
        self.tombstones = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            base: self.buckets.iter(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            base: self.buckets.iter_mut(),
            remaining: self.len,
        }
    }

    pub fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            base: self.buckets.into_vec().into_iter(),
            remaining: self.len,
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.build_hasher.hash_one(key)
    }

    // Walks the probe sequence for `hash`. Returns the slot holding the
    // key, or the slot a new entry should land in. `Err(None)` means the
    // sequence was exhausted without finding room.
    fn locate<Q>(&self, hash: u64, key: &Q) -> Result<usize, Option<usize>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let capacity = self.buckets.len();
        let mut probe = Probe::start(hash, capacity);
        let mut insert = None;

        while probe.len < capacity {
            match &self.buckets[probe.i] {
                // The key cannot exist past an empty slot.
                Bucket::Empty => return Err(Some(insert.unwrap_or(probe.i))),
                Bucket::Tombstone => {
                    if insert.is_none() {
                        insert = Some(probe.i);
                    }
                }
                Bucket::Full(h, k, _) if *h == hash && k.borrow() == key => {
                    return Ok(probe.i);
                }
                Bucket::Full(..) => {}
            }

            probe.next();
        }

        Err(insert)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.len == 0 {
            return None;
        }

        let i = self.locate(self.hash(key), key).ok()?;
        match &self.buckets[i] {
            Bucket::Full(_, k, v) => Some((k, v)),
            _ => None,
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.len == 0 {
            return None;
        }

        let i = self.locate(self.hash(key), key).ok()?;
        match &mut self.buckets[i] {
            Bucket::Full(_, _, v) => Some(v),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash(&key);

        match self.locate(hash, &key) {
            Ok(i) => match &mut self.buckets[i] {
                Bucket::Full(_, _, v) => Some(mem::replace(v, value)),
                _ => None,
            },
            Err(slot) => {
                let i = match slot {
                    Some(i) if self.len + self.tombstones < self.threshold => i,
                    _ => {
                        self.resize();

                        // A freshly rehashed table always has an empty
                        // slot on the probe sequence.
                        match self.locate(hash, &key) {
                            Err(Some(i)) => i,
                            _ => unreachable!("no free slot after rehash"),
                        }
                    }
                };

                if let Bucket::Tombstone = self.buckets[i] {
                    self.tombstones -= 1;
                }

                self.buckets[i] = Bucket::Full(hash, key, value);
                self.len += 1;
                None
            }
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.len == 0 {
            return None;
        }

        let i = self.locate(self.hash(key), key).ok()?;
        match mem::replace(&mut self.buckets[i], Bucket::Tombstone) {
            Bucket::Full(_, k, v) => {
                self.len -= 1;
                self.tombstones += 1;
                Some((k, v))
            }
            bucket => {
                self.buckets[i] = bucket;
                None
            }
        }
    }

    // Rehash into a table sized for the current occupancy: double when
    // live entries drove the table to its threshold, otherwise keep the
    // capacity and just drop the accumulated tombstones.
    fn resize(&mut self) {
        let capacity = self.buckets.len();
        let new_capacity = if self.len + 1 > self.threshold / 2 {
            cmp::min(capacity << 1, MAX_CAPACITY)
        } else {
            capacity
        };

        self.rehash(new_capacity);
    }

    fn rehash(&mut self, capacity: usize) {
        let old = mem::replace(&mut self.buckets, new_bucket_table(capacity));
        self.threshold = threshold_for(capacity, self.load_factor);
        self.tombstones = 0;

        for bucket in old.into_vec() {
            if let Bucket::Full(hash, key, value) = bucket {
                let mut probe = Probe::start(hash, capacity);
                while let Bucket::Full(..) = self.buckets[probe.i] {
                    probe.next();
                }

                self.buckets[probe.i] = Bucket::Full(hash, key, value);
            }
        }
    }
}

// An iterator over the occupied buckets of a table.
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    base: slice::Iter<'a, Bucket<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.base.by_ref() {
            if let Bucket::Full(_, k, v) = bucket {
                self.remaining -= 1;
                return Some((k, v));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

pub struct IterMut<'a, K, V> {
    base: slice::IterMut<'a, Bucket<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.base.by_ref() {
            if let Bucket::Full(_, k, v) = bucket {
                self.remaining -= 1;
                return Some((&*k, v));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

pub struct IntoIter<K, V> {
    base: vec::IntoIter<Bucket<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.base.by_ref() {
            if let Bucket::Full(_, k, v) = bucket {
                self.remaining -= 1;
                return Some((k, v));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
