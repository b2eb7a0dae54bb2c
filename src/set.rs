use crate::map::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
use crate::raw;
use crate::InvalidLoadFactor;

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// A hash set with power-of-two capacities and explicit load-factor
/// control.
///
/// This is a thin wrapper around a [`HashMap`](crate::HashMap) with `()`
/// values; capacity and growth behave identically.
pub struct HashSet<K, S = RandomState> {
    raw: raw::HashMap<K, (), S>,
}

impl<K> HashSet<K> {
    /// Creates an empty `HashSet` with the default capacity and load
    /// factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use quince::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert_eq!(set.capacity(), 16);
    /// ```
    pub fn new() -> HashSet<K> {
        HashSet::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `HashSet` with space for at least `capacity`
    /// buckets and the default load factor.
    pub fn with_capacity(capacity: usize) -> HashSet<K> {
        HashSet::with_capacity_and_hasher(capacity, RandomState::new())
    }

    /// Creates an empty `HashSet` with the given capacity and load factor.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidLoadFactor`] if `load_factor` is not positive
    /// and finite.
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f32,
    ) -> Result<HashSet<K>, InvalidLoadFactor> {
        let load_factor = crate::map::validate(load_factor)?;

        Ok(HashSet {
            raw: raw::HashMap::with_capacity_and_hasher(capacity, load_factor, RandomState::new()),
        })
    }
}

impl<K, S> HashSet<K, S> {
    /// Creates an empty `HashSet` with the default capacity, using
    /// `build_hasher` to hash values.
    pub fn with_hasher(build_hasher: S) -> HashSet<K, S> {
        HashSet::with_capacity_and_hasher(DEFAULT_CAPACITY, build_hasher)
    }

    /// Creates an empty `HashSet` with the given capacity and the default
    /// load factor, using `build_hasher` to hash values.
    pub fn with_capacity_and_hasher(capacity: usize, build_hasher: S) -> HashSet<K, S> {
        HashSet {
            raw: raw::HashMap::with_capacity_and_hasher(capacity, DEFAULT_LOAD_FACTOR, build_hasher),
        }
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Returns the number of buckets in the table. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the occupancy at which the table grows.
    pub fn threshold(&self) -> usize {
        self.raw.threshold()
    }

    /// Returns the load factor the table was configured with.
    pub fn load_factor(&self) -> f32 {
        self.raw.load_factor()
    }

    /// Returns a reference to the set's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    /// Clears the set, removing all values. The bucket table is retained.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// An iterator over the values of the set.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            raw: self.raw.iter(),
        }
    }
}

impl<K, S> HashSet<K, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if the set contains `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quince::HashSet;
    ///
    /// let mut set = HashSet::new();
    /// set.insert("a");
    /// assert!(set.contains("a"));
    /// assert!(!set.contains("b"));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(value).is_some()
    }

    /// Returns a reference to the stored value equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(value).map(|(k, _)| k)
    }

    /// Adds a value to the set, returning `true` if it was not already
    /// present.
    pub fn insert(&mut self, value: K) -> bool {
        self.raw.insert(value, ()).is_none()
    }

    /// Removes a value from the set, returning `true` if it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.remove(value).is_some()
    }

    /// Removes and returns the stored value equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.remove(value).map(|(k, _)| k)
    }
}

impl<K, S: Default> Default for HashSet<K, S> {
    fn default() -> HashSet<K, S> {
        HashSet {
            raw: raw::HashMap::with_capacity_and_hasher(
                DEFAULT_CAPACITY,
                DEFAULT_LOAD_FACTOR,
                S::default(),
            ),
        }
    }
}

impl<K: Clone, S: Clone> Clone for HashSet<K, S> {
    fn clone(&self) -> HashSet<K, S> {
        HashSet {
            raw: self.raw.clone(),
        }
    }
}

impl<K, S> fmt::Debug for HashSet<K, S>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, S> PartialEq for HashSet<K, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K, S> Eq for HashSet<K, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
}

impl<K, S> Extend<K> for HashSet<K, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<K, S> FromIterator<K> for HashSet<K, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> HashSet<K, S> {
        let iter = iter.into_iter();

        let (lower, _) = iter.size_hint();
        let capacity = std::cmp::max(
            (lower as f64 / DEFAULT_LOAD_FACTOR as f64) as usize + 1,
            DEFAULT_CAPACITY,
        );

        let mut set = HashSet {
            raw: raw::HashMap::with_capacity_and_hasher(
                capacity,
                DEFAULT_LOAD_FACTOR,
                S::default(),
            ),
        };
        set.extend(iter);
        set
    }
}

impl<'a, K, S> IntoIterator for &'a HashSet<K, S> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K, S> IntoIterator for HashSet<K, S> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        IntoIter {
            raw: self.raw.into_iter(),
        }
    }
}

/// An iterator over the values of a [`HashSet`].
#[derive(Clone)]
pub struct Iter<'a, K> {
    raw: raw::Iter<'a, K, ()>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

/// An owning iterator over the values of a [`HashSet`].
pub struct IntoIter<K> {
    raw: raw::IntoIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
