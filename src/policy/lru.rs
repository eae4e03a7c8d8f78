//! LRU (Least Recently Used) eviction.
//!
//! Every insert, overwrite and successful `get` makes a key the most
//! recently used. When a new key needs room, the key untouched for longest
//! is evicted.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        LruTracker<K> Layout                                 │
//! │                                                                             │
//! │   recency: RecencyList<K>                                                   │
//! │                                                                             │
//! │   index: FxHashMap<K, SlotId>    nodes: SlotArena<Node<K>>                  │
//! │                                                                             │
//! │   newest (MRU) ─► [D] ◄──► [C] ◄──► [B] ◄──► [A] ◄── oldest (LRU)           │
//! │                                               ↑                             │
//! │                                             EVICT                           │
//! │                                                                             │
//! │   get(B):  newest ─► [B] ◄──► [D] ◄──► [C] ◄──► [A] ◄── oldest              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation      | Time | Notes                         |
//! |----------------|------|-------------------------------|
//! | `record_insert`| O(1) | push to MRU end               |
//! | `record_hit`   | O(1) | move to MRU end               |
//! | `pop_victim`   | O(1) | pop from LRU end              |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::listener::RecordingListener;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::with_listener(2, RecordingListener::new()).unwrap();
//! cache.put(Some("A"), Some(1));
//! cache.put(Some("B"), Some(2));
//! cache.get(&"A");
//! cache.put(Some("C"), Some(3));
//!
//! assert_eq!(cache.listener().keys(), &["B"]);
//! ```

use std::hash::Hash;

use crate::cache::PolicyCache;
use crate::ds::RecencyList;
use crate::listener::LogListener;
use crate::policy::OrderTracker;

/// LRU cache: [`PolicyCache`] driven by an [`LruTracker`].
pub type LruCache<K, V, L = LogListener> = PolicyCache<K, V, LruTracker<K>, L>;

/// Recency order of keys, evicting from the least recently used end.
#[derive(Debug)]
pub struct LruTracker<K> {
    recency: RecencyList<K>,
}

impl<K> LruTracker<K>
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

impl<K> Default for LruTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderTracker<K> for LruTracker<K>
where
    K: Eq + Hash + Clone,
{
    const POLICY: &'static str = "lru";

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
        self.recency.lru()
    }

    fn pop_victim(&mut self) -> Option<K> {
        let key = self.recency.pop_lru();
        #[cfg(debug_assertions)]
        self.recency.debug_validate_invariants();
        key
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
