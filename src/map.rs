use crate::raw;

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::error::Error;
use std::hash::{BuildHasher, Hash};
use std::{cmp, fmt};

pub use crate::raw::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_CAPACITY};

/// The error returned when a requested load factor is rejected.
///
/// A load factor must be positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidLoadFactor {
    /// The rejected value.
    pub load_factor: f32,
}

impl fmt::Display for InvalidLoadFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal load factor: {}", self.load_factor)
    }
}

impl Error for InvalidLoadFactor {}

pub(crate) fn validate(load_factor: f32) -> Result<f32, InvalidLoadFactor> {
    if load_factor.is_finite() && load_factor > 0.0 {
        Ok(load_factor)
    } else {
        Err(InvalidLoadFactor { load_factor })
    }
}

/// A hash table with power-of-two capacities and explicit load-factor
/// control.
///
/// The bucket table always holds a power-of-two number of slots, capped at
/// [`MAX_CAPACITY`]. The table grows once its occupancy reaches
/// `floor(capacity * load_factor)`; see [`HashMap::threshold`].
pub struct HashMap<K, V, S = RandomState> {
    raw: raw::HashMap<K, V, S>,
}

impl<K, V> HashMap<K, V> {
    /// Creates an empty `HashMap` with the default capacity and load
    /// factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use quince::HashMap;
    ///
    /// let map: HashMap<&str, i32> = HashMap::new();
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> HashMap<K, V> {
        HashMap::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `HashMap` with space for at least `capacity`
    /// buckets and the default load factor.
    ///
    /// The capacity is rounded up to the next power of two and clamped at
    /// [`MAX_CAPACITY`]. A capacity of zero still allocates a single
    /// bucket.
    pub fn with_capacity(capacity: usize) -> HashMap<K, V> {
        HashMap::with_capacity_and_hasher(capacity, RandomState::new())
    }

    /// Creates an empty `HashMap` with the given capacity and load factor.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidLoadFactor`] if `load_factor` is not positive
    /// and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use quince::HashMap;
    ///
    /// let map: HashMap<&str, i32> = HashMap::with_capacity_and_load_factor(10, 0.75).unwrap();
    /// assert_eq!(map.capacity(), 16);
    /// assert_eq!(map.threshold(), 12);
    ///
    /// assert!(HashMap::<&str, i32>::with_capacity_and_load_factor(10, f32::NAN).is_err());
    /// ```
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f32,
    ) -> Result<HashMap<K, V>, InvalidLoadFactor> {
        HashMap::with_capacity_and_load_factor_and_hasher(capacity, load_factor, RandomState::new())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty `HashMap` with the default capacity, using
    /// `build_hasher` to hash keys.
    pub fn with_hasher(build_hasher: S) -> HashMap<K, V, S> {
        HashMap::with_capacity_and_hasher(DEFAULT_CAPACITY, build_hasher)
    }

    /// Creates an empty `HashMap` with the given capacity and the default
    /// load factor, using `build_hasher` to hash keys.
    pub fn with_capacity_and_hasher(capacity: usize, build_hasher: S) -> HashMap<K, V, S> {
        HashMap {
            raw: raw::HashMap::with_capacity_and_hasher(capacity, DEFAULT_LOAD_FACTOR, build_hasher),
        }
    }

    /// Creates an empty `HashMap` with the given capacity and load factor,
    /// using `build_hasher` to hash keys.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidLoadFactor`] if `load_factor` is not positive
    /// and finite.
    pub fn with_capacity_and_load_factor_and_hasher(
        capacity: usize,
        load_factor: f32,
        build_hasher: S,
    ) -> Result<HashMap<K, V, S>, InvalidLoadFactor> {
        let load_factor = validate(load_factor)?;

        Ok(HashMap {
            raw: raw::HashMap::with_capacity_and_hasher(capacity, load_factor, build_hasher),
        })
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Returns the number of buckets in the table. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the occupancy at which the table grows, i.e.
    /// `floor(capacity * load_factor)`.
    pub fn threshold(&self) -> usize {
        self.raw.threshold()
    }

    /// Returns the load factor the table was configured with.
    pub fn load_factor(&self) -> f32 {
        self.raw.load_factor()
    }

    /// Returns a reference to the map's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    /// Clears the map, removing all entries. The bucket table is retained.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// An iterator over the entries of the map, yielding `(&K, &V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }

    /// An iterator over the entries of the map, yielding `(&K, &mut V)`.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            raw: self.raw.iter_mut(),
        }
    }

    /// An iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            raw: self.raw.iter(),
        }
    }

    /// An iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            raw: self.raw.iter(),
        }
    }

    /// An iterator over mutable references to the values of the map.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            raw: self.raw.iter_mut(),
        }
    }

    /// Returns a borrowed view of the map's entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use quince::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    ///
    /// let entries = map.entries();
    /// assert!(entries.contains("a", &1));
    /// assert!(!entries.contains("a", &2));
    /// ```
    pub fn entries(&self) -> Entries<'_, K, V, S> {
        Entries { raw: &self.raw }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns a reference to the value mapped to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quince::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key).map(|(_, v)| v)
    }

    /// Returns the key and value mapped to `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value mapped to `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key).is_some()
    }

    /// Inserts a key-value pair, returning the previous value for the key
    /// if there was one.
    ///
    /// Inserting past the table's [threshold](HashMap::threshold) grows
    /// the table to the next power of two and rehashes.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.remove(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.remove(key)
    }
}

impl<K, V, S: Default> Default for HashMap<K, V, S> {
    fn default() -> HashMap<K, V, S> {
        HashMap::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for HashMap<K, V, S> {
    fn clone(&self) -> HashMap<K, V, S> {
        HashMap {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for HashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> HashMap<K, V, S> {
        let iter = iter.into_iter();

        // Size the table so the lower bound fits without an immediate
        // rehash.
        let (lower, _) = iter.size_hint();
        let capacity = cmp::max(
            (lower as f64 / DEFAULT_LOAD_FACTOR as f64) as usize + 1,
            DEFAULT_CAPACITY,
        );

        let mut map = HashMap::with_capacity_and_hasher(capacity, S::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            raw: self.raw.into_iter(),
        }
    }
}

/// A borrowed view of the entries of a [`HashMap`].
///
/// The view references the underlying table; it holds no entries of its
/// own and is invalidated by mutation like any other borrow.
pub struct Entries<'a, K, V, S> {
    raw: &'a raw::HashMap<K, V, S>,
}

impl<K, V, S> Entries<'_, K, V, S> {
    /// Returns the number of entries in the underlying map.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the underlying map is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// An iterator over the entries of the underlying map.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }
}

impl<K, V, S> Entries<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if the map contains exactly this key-value pair.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.raw.get(key).map(|(_, v)| v) == Some(value)
    }
}

impl<'a, K, V, S> IntoIterator for &'a Entries<'a, K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }
}

impl<K, V, S> fmt::Debug for Entries<'_, K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// An iterator over the entries of a [`HashMap`].
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    raw: raw::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`HashMap`].
pub struct IterMut<'a, K, V> {
    raw: raw::IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`HashMap`].
pub struct IntoIter<K, V> {
    raw: raw::IntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the keys of a [`HashMap`].
#[derive(Clone)]
pub struct Keys<'a, K, V> {
    raw: raw::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`HashMap`].
#[derive(Clone)]
pub struct Values<'a, K, V> {
    raw: raw::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`HashMap`].
pub struct ValuesMut<'a, K, V> {
    raw: raw::IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
