//! LIFO (Last In, First Out) eviction.
//!
//! Evicts the most recently inserted key: the top of the stack as it stood
//! before the insert that needs room. Reads and overwrites never move a key.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        LifoTracker<K> Layout                                │
//! │                                                                             │
//! │   stack: Vec<K>                          members: FxHashSet<K>              │
//! │                                                                             │
//! │   ┌─────────────────────────┐                                               │
//! │   │ Bottom        Top       │                                               │
//! │   ├─────────────────────────┤                                               │
//! │   │ [A] [B] [C] [D]         │                                               │
//! │   │  ↑            ↑         │                                               │
//! │   │ keep        EVICT       │                                               │
//! │   └─────────────────────────┘                                               │
//! │                                                                             │
//! │   Insert E into a full cache:                                               │
//! │     pop D, push E  →  [A] [B] [C] [E]                                       │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lifo::LifoCache;
//! use evictkit::listener::RecordingListener;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LifoCache::with_listener(4, RecordingListener::new()).unwrap();
//! for (key, value) in [("A", "Hello"), ("B", "World"), ("C", "Holberton"), ("D", "School")] {
//!     cache.put(Some(key), Some(value));
//! }
//! cache.put(Some("E"), Some("Battery"));
//! cache.put(Some("C"), Some("Street"));
//! cache.put(Some("F"), Some("Mission"));
//!
//! // "D" was on top when "E" arrived, then "E" was on top when "F" arrived
//! assert_eq!(cache.listener().keys(), &["D", "E"]);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::cache::PolicyCache;
use crate::listener::LogListener;
use crate::policy::OrderTracker;

/// LIFO cache: [`PolicyCache`] driven by a [`LifoTracker`].
pub type LifoCache<K, V, L = LogListener> = PolicyCache<K, V, LifoTracker<K>, L>;

/// Insertion-order stack of keys.
#[derive(Debug)]
pub struct LifoTracker<K> {
    /// Top = most recent insertion
    stack: Vec<K>,
    members: FxHashSet<K>,
}

impl<K> LifoTracker<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Iterates from bottom (oldest) to top (next victim).
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.stack.iter()
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        debug_assert_eq!(self.stack.len(), self.members.len());
    }
}

impl<K> Default for LifoTracker<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderTracker<K> for LifoTracker<K>
where
    K: Eq + Hash + Clone,
{
    const POLICY: &'static str = "lifo";

    fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
            members: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    fn record_insert(&mut self, key: K) {
        if self.members.insert(key.clone()) {
            self.stack.push(key);
        }
        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    #[inline]
    fn record_update(&mut self, _key: &K) {}

    #[inline]
    fn record_hit(&mut self, _key: &K) {}

    fn peek_victim(&self) -> Option<&K> {
        self.stack.last()
    }

    fn pop_victim(&mut self) -> Option<K> {
        let key = self.stack.pop()?;
        self.members.remove(&key);
        Some(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.stack.len()
    }

    fn clear(&mut self) {
        self.stack.clear();
        self.members.clear();
    }
}
