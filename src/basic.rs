//! Unbounded cache with no eviction.
//!
//! [`BasicCache`] follows the same `put`/`get` contract as the bounded
//! caches but has no capacity limit, so it never evicts and never notifies.
//! It suits small, known key sets and serves as the reference behavior the
//! bounded caches add eviction to.
//!
//! ```
//! use evictkit::basic::BasicCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = BasicCache::new();
//! cache.put(Some("A"), Some("Hello"));
//! cache.put(Some("B"), Some("World"));
//! cache.put(None, Some("ignored"));
//!
//! assert_eq!(cache.get(&"A"), Some(&"Hello"));
//! assert_eq!(cache.len(), 2);
//! assert_eq!(cache.capacity(), usize::MAX);
//! ```

use std::hash::Hash;

use crate::store::Store;
use crate::traits::CoreCache;

#[derive(Debug)]
pub struct BasicCache<K, V> {
    store: Store<K, V>,
}

impl<K, V> BasicCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            store: Store::unbounded(),
        }
    }

    /// Iterates over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter()
    }
}

impl<K, V> Default for BasicCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CoreCache<K, V> for BasicCache<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        // An unbounded store never reports full.
        self.store.try_insert(key, value).ok().flatten()
    }

    fn put(&mut self, key: Option<K>, value: Option<V>) {
        match (key, value) {
            (Some(key), Some(value)) => {
                self.insert(key, value);
            }
            _ => tracing::trace!(policy = "basic", "put ignored"),
        }
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.store.capacity()
    }

    fn clear(&mut self) {
        self.store.clear();
    }
}
