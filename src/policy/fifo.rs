//! FIFO (First In, First Out) eviction.
//!
//! Evicts the key that entered the cache earliest. Reads and overwrites
//! leave the order alone: only a key's first insertion counts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FifoTracker<K> Layout                                │
//! │                                                                             │
//! │   queue: VecDeque<K>                     members: FxHashSet<K>              │
//! │                                                                             │
//! │   front (oldest)              back (newest)                                 │
//! │     [A] ─► [B] ─► [C] ─► [D]                                                │
//! │      ↑                     ↑                                                │
//! │    EVICT                 push_back on insert                                │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys leave the queue only from the front, so the queue never holds stale
//! entries and needs no lazy cleanup.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::listener::RecordingListener;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = FifoCache::with_listener(4, RecordingListener::new()).unwrap();
//! for (key, value) in [("A", "Hello"), ("B", "World"), ("C", "Holberton"), ("D", "School")] {
//!     cache.put(Some(key), Some(value));
//! }
//!
//! // Reading "A" does not save it
//! assert_eq!(cache.get(&"A"), Some(&"Hello"));
//! cache.put(Some("E"), Some("Battery"));
//!
//! assert_eq!(cache.listener().keys(), &["A"]);
//! assert_eq!(cache.get(&"A"), None);
//! ```

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::cache::PolicyCache;
use crate::listener::LogListener;
use crate::policy::OrderTracker;

/// FIFO cache: [`PolicyCache`] driven by a [`FifoTracker`].
pub type FifoCache<K, V, L = LogListener> = PolicyCache<K, V, FifoTracker<K>, L>;

/// Insertion-order queue of keys.
#[derive(Debug)]
pub struct FifoTracker<K> {
    queue: VecDeque<K>,
    members: FxHashSet<K>,
}

impl<K> FifoTracker<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.queue.iter()
    }
}

impl<K> Default for FifoTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderTracker<K> for FifoTracker<K>
where
    K: Eq + Hash + Clone,
{
    const POLICY: &'static str = "fifo";

    fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            members: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    fn record_insert(&mut self, key: K) {
        if self.members.insert(key.clone()) {
            self.queue.push_back(key);
        }
    }

    #[inline]
    fn record_update(&mut self, _key: &K) {}

    #[inline]
    fn record_hit(&mut self, _key: &K) {}

    fn peek_victim(&self) -> Option<&K> {
        self.queue.front()
    }

    fn pop_victim(&mut self) -> Option<K> {
        let key = self.queue.pop_front()?;
        self.members.remove(&key);
        Some(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.members.clear();
    }
}
