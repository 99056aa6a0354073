use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::mem;

use log::debug;

/// Number of buckets of a map created with [`ChainedHashMap::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Entries per bucket at which the bucket array doubles.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// A hash map resolving collisions by chaining entries within a bucket.
///
/// Once the number of entries reaches [`MAX_LOAD_FACTOR`] times the bucket
/// count, the bucket array doubles and every entry is rehashed into its new
/// bucket.
///
/// ```
/// use balanced_set::collections::ChainedHashMap;
/// let mut map = ChainedHashMap::new();
/// map.insert_or_update("one", 1);
/// map.insert_or_update("two", 2);
/// assert_eq!(map.insert_or_update("one", 11), Some(1));
/// assert_eq!(map.try_get(&"one"), Some(&11));
/// assert!(map.remove(&"two"));
/// assert_eq!(map.try_get(&"two"), None);
/// ```
#[derive(Clone, Debug)]
pub struct ChainedHashMap<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    hash_builder: RandomState,
}

impl<K: Hash + Eq, V> ChainedHashMap<K, V> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
            hash_builder: RandomState::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts a key-value pair, or replaces the value of a present key.
    /// Returns the replaced value.
    pub fn insert_or_update(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if let Some((_, existing)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(existing, value));
        }

        bucket.push((key, value));
        self.len += 1;
        if self.len as f64 >= self.buckets.len() as f64 * MAX_LOAD_FACTOR {
            self.grow();
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn try_get(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Removes a key from the map.
    /// Returns whether the key was previously in the map.
    pub fn remove(&mut self, key: &K) -> bool {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        match bucket.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                bucket.swap_remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        debug!(
            "growing hash map from {} to {new_capacity} buckets ({} entries)",
            self.buckets.len(),
            self.len
        );
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for (key, value) in old_buckets.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

impl<K: Hash + Eq, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_buckets<K, V>(count: usize) -> Vec<Vec<(K, V)>> {
    (0..count).map(|_| Vec::new()).collect()
}

#[cfg(test)]
mod tests {
    use super::{ChainedHashMap, DEFAULT_CAPACITY};

    #[test]
    fn test_insert_or_update() {
        let mut map = ChainedHashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.insert_or_update(1, "one"), None);
        assert_eq!(map.insert_or_update(1, "uno"), Some("one"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.try_get(&1), Some(&"uno"));
        assert_eq!(map.try_get(&2), None);
    }

    #[test]
    fn test_grow_rehashes_entries() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
        for key in 0..7 {
            map.insert_or_update(key, key * 10);
        }
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
        map.insert_or_update(7, 70);
        assert_eq!(map.capacity(), 2 * DEFAULT_CAPACITY);

        for key in 8..1_000 {
            map.insert_or_update(key, key * 10);
        }
        assert_eq!(map.len(), 1_000);
        for key in 0..1_000 {
            assert_eq!(map.try_get(&key), Some(&(key * 10)));
        }
    }

    #[test]
    fn test_remove() {
        let mut map = ChainedHashMap::with_capacity(1);
        for key in ["a", "b", "c", "d"] {
            map.insert_or_update(key.to_string(), key.len());
        }
        assert!(map.remove(&"b".to_string()));
        assert!(!map.remove(&"b".to_string()));
        assert_eq!(map.len(), 3);
        assert_eq!(map.try_get(&"b".to_string()), None);
        assert_eq!(map.try_get(&"c".to_string()), Some(&1));
    }
}
