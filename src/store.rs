//! Bounded key/value storage shared by every cache policy.
//!
//! The store owns keys and values and enforces the entry-count bound; the
//! order trackers in [`policy`](crate::policy) own eviction metadata. Keeping
//! the two apart lets one facade ([`PolicyCache`](crate::cache::PolicyCache))
//! drive any tracker over the same storage.
//!
//! ## Core Operations
//! - `try_insert`: insert or update by key; refuses a new key when full.
//! - `get` / `get_mut`: lookup by key.
//! - `remove`: delete by key (used when a victim is evicted).
//! - `clear`: drop all entries.
//!
//! ## Example Usage
//! ```rust
//! use evictkit::store::{Store, StoreFull};
//!
//! let mut store: Store<u64, &str> = Store::new(2);
//! assert_eq!(store.try_insert(1, "a"), Ok(None));
//! assert_eq!(store.try_insert(2, "b"), Ok(None));
//! assert!(store.is_full());
//!
//! // Updates are always accepted, new keys are not.
//! assert_eq!(store.try_insert(1, "A"), Ok(Some("a")));
//! assert_eq!(store.try_insert(3, "c"), Err(StoreFull));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Upper bound on eager allocation; larger stores grow on demand.
pub(crate) const MAX_PREALLOC: usize = 1 << 12;

/// Error returned when a new key is inserted into a full store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFull;

/// Single-threaded `FxHashMap`-backed store with a fixed entry capacity.
#[derive(Debug)]
pub struct Store<K, V> {
    map: FxHashMap<K, V>,
    capacity: usize,
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty store that holds at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(
                capacity.min(MAX_PREALLOC),
                Default::default(),
            ),
            capacity,
        }
    }

    /// Creates an empty store with no practical bound.
    pub fn unbounded() -> Self {
        Self {
            map: FxHashMap::default(),
            capacity: usize::MAX,
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts or updates a value, returning the previous one on update.
    ///
    /// Returns `StoreFull` when `key` is new and the store is at capacity.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, StoreFull> {
        if let Some(slot) = self.map.get_mut(&key) {
            return Ok(Some(std::mem::replace(slot, value)));
        }
        if self.is_full() {
            return Err(StoreFull);
        }
        self.map.insert(key, value);
        Ok(None)
    }

    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` when inserting a new key would exceed capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Iterates over stored entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter()
    }
}
