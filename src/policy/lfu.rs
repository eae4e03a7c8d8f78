//! LFU (Least Frequently Used) eviction with LRU tie-breaking.
//!
//! Each key carries an access count: 1 when inserted, +1 for every
//! overwrite and every successful `get` (misses do not count). The victim is
//! the key with the lowest count; among keys sharing that count, the one
//! accessed least recently goes first.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        LfuTracker<K> Layout                                 │
//! │                                                                             │
//! │   buckets: FrequencyBuckets<K>                                              │
//! │                                                                             │
//! │     lowest ─► count 1 ─► count 3                                            │
//! │     count 1: newest ─► [D] ─► [B] ◄─ oldest     ← EVICT B                   │
//! │     count 3: newest ─► [A] ◄─ oldest                                        │
//! │                                                                             │
//! │   get(B):   B moves to the newest end of a new count-2 bucket               │
//! │     count 1: newest ─► [D] ◄─ oldest            ← next victim D             │
//! │     count 2: newest ─► [B] ◄─ oldest                                        │
//! │     count 3: newest ─► [A] ◄─ oldest                                        │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A new key always starts at the lowest possible count, so a cache that is
//! full of frequently read keys evicts the newest arrival first on the next
//! overflow.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::listener::RecordingListener;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LfuCache::with_listener(2, RecordingListener::new()).unwrap();
//! cache.put(Some("A"), Some(1));
//! cache.put(Some("B"), Some(2));
//! cache.get(&"A");
//! cache.get(&"A");
//! cache.put(Some("C"), Some(3));
//!
//! assert_eq!(cache.listener().keys(), &["B"]);
//! assert_eq!(cache.tracker().frequency(&"A"), Some(3));
//! ```

use std::hash::Hash;

use crate::cache::PolicyCache;
use crate::ds::FrequencyBuckets;
use crate::listener::LogListener;
use crate::policy::OrderTracker;

/// LFU cache: [`PolicyCache`] driven by an [`LfuTracker`].
pub type LfuCache<K, V, L = LogListener> = PolicyCache<K, V, LfuTracker<K>, L>;

/// Access counts bucketed by frequency.
#[derive(Debug)]
pub struct LfuTracker<K> {
    buckets: FrequencyBuckets<K>,
}

impl<K> LfuTracker<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            buckets: FrequencyBuckets::new(),
        }
    }

    /// Current access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.buckets.frequency(key)
    }

    /// Lowest access count among tracked keys.
    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }
}

impl<K> Default for LfuTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderTracker<K> for LfuTracker<K>
where
    K: Eq + Hash + Clone,
{
    const POLICY: &'static str = "lfu";

    fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: FrequencyBuckets::with_capacity(capacity),
        }
    }

    #[inline]
    fn record_insert(&mut self, key: K) {
        self.buckets.insert(key);
    }

    #[inline]
    fn record_update(&mut self, key: &K) {
        self.buckets.touch(key);
    }

    #[inline]
    fn record_hit(&mut self, key: &K) {
        self.buckets.touch(key);
    }

    fn peek_victim(&self) -> Option<&K> {
        self.buckets.peek_min().map(|(key, _)| key)
    }

    fn pop_victim(&mut self) -> Option<K> {
        let victim = self.buckets.pop_min().map(|(key, _)| key);
        #[cfg(debug_assertions)]
        self.buckets.debug_validate_invariants();
        victim
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.buckets.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }
}
