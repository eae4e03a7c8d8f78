//! MRU (Most Recently Used) eviction.
//!
//! Same bookkeeping as [`lru`](crate::policy::lru), opposite victim: the key
//! accessed most recently (by insert, overwrite or successful `get`) is the
//! one evicted. Useful when the newest data is the least likely to be read
//! again, such as cyclic scans larger than the cache.
//!
//! ```text
//!   front (MRU) ─► [D] ◄──► [C] ◄──► [B] ◄──► [A] ◄── back (LRU)
//!                   ↑
//!                 EVICT
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//! use evictkit::listener::RecordingListener;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = MruCache::with_listener(2, RecordingListener::new()).unwrap();
//! cache.put(Some("A"), Some(1));
//! cache.put(Some("B"), Some(2));
//! cache.get(&"A");
//! cache.put(Some("C"), Some(3));
//!
//! assert_eq!(cache.listener().keys(), &["A"]);
//! ```

use std::hash::Hash;

use crate::cache::PolicyCache;
use crate::ds::RecencyList;
use crate::listener::LogListener;
use crate::policy::OrderTracker;

/// MRU cache: [`PolicyCache`] driven by an [`MruTracker`].
pub type MruCache<K, V, L = LogListener> = PolicyCache<K, V, MruTracker<K>, L>;

/// Recency order of keys, evicting from the most recently used end.
#[derive(Debug)]
pub struct MruTracker<K> {
    recency: RecencyList<K>,
}

impl<K> MruTracker<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            recency: RecencyList::new(),
        }
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.recency.iter()
    }
}

impl<K> Default for MruTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderTracker<K> for MruTracker<K>
where
    K: Eq + Hash + Clone,
{
    const POLICY: &'static str = "mru";

    fn with_capacity(capacity: usize) -> Self {
        Self {
            recency: RecencyList::with_capacity(capacity),
        }
    }

    #[inline]
    fn record_insert(&mut self, key: K) {
        self.recency.insert(key);
    }

    #[inline]
    fn record_update(&mut self, key: &K) {
        self.recency.touch(key);
    }

    #[inline]
    fn record_hit(&mut self, key: &K) {
        self.recency.touch(key);
    }

    fn peek_victim(&self) -> Option<&K> {
        self.recency.mru()
    }

    fn pop_victim(&mut self) -> Option<K> {
        self.recency.pop_mru()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.recency.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.recency.len()
    }

    fn clear(&mut self) {
        self.recency.clear();
    }
}
