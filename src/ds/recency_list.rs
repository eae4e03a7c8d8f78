//! Key recency ordering with O(1) touch and removal at either end.
//!
//! A doubly linked chain of keys whose nodes live in a [`SlotArena`], plus a
//! key → [`SlotId`] index. `newest` is the most recently used key, `oldest`
//! the least recently used. LRU and MRU trackers share this structure and
//! differ only in which end they evict from.
//!
//! ```text
//!   index: { "a" → 0, "b" → 1, "c" → 2 }
//!
//!   newest (MRU) ─► [c] ◄──► [b] ◄──► [a] ◄── oldest (LRU)
//!
//!   touch("a"):  newest ─► [a] ◄──► [c] ◄──► [b] ◄── oldest
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::ds::RecencyList;
//!
//! let mut recency = RecencyList::new();
//! recency.insert("a");
//! recency.insert("b");
//! recency.touch(&"a");
//!
//! assert_eq!(recency.mru(), Some(&"a"));
//! assert_eq!(recency.lru(), Some(&"b"));
//! assert_eq!(recency.pop_lru(), Some("b"));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<K> {
    key: K,
    /// Neighbor toward `newest`
    newer: Option<SlotId>,
    /// Neighbor toward `oldest`
    older: Option<SlotId>,
}

/// Recency-ordered set of keys.
#[derive(Debug)]
pub struct RecencyList<K> {
    index: FxHashMap<K, SlotId>,
    nodes: SlotArena<Node<K>>,
    newest: Option<SlotId>,
    oldest: Option<SlotId>,
}

impl<K> RecencyList<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            nodes: SlotArena::with_capacity(capacity),
            newest: None,
            oldest: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Adds `key` as the most recently used entry.
    ///
    /// Returns `false` (and only touches the key) if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.touch(&key) {
            return false;
        }
        let id = self.nodes.insert(Node {
            key: key.clone(),
            newer: None,
            older: None,
        });
        self.link_newest(id);
        self.index.insert(key, id);
        true
    }

    /// Marks `key` as the most recently used entry.
    pub fn touch(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.newest != Some(id) {
            self.unlink(id);
            self.link_newest(id);
        }
        true
    }

    /// Least recently used key.
    #[inline]
    pub fn lru(&self) -> Option<&K> {
        self.key_at(self.oldest)
    }

    /// Most recently used key.
    #[inline]
    pub fn mru(&self) -> Option<&K> {
        self.key_at(self.newest)
    }

    pub fn pop_lru(&mut self) -> Option<K> {
        let id = self.oldest?;
        self.take(id)
    }

    pub fn pop_mru(&mut self) -> Option<K> {
        let id = self.newest?;
        self.take(id)
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            nodes: &self.nodes,
            next: self.newest,
        }
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.newest = None;
        self.oldest = None;
    }

    fn key_at(&self, id: Option<SlotId>) -> Option<&K> {
        self.nodes.get(id?).map(|node| &node.key)
    }

    fn take(&mut self, id: SlotId) -> Option<K> {
        self.unlink(id);
        let node = self.nodes.remove(id)?;
        self.index.remove(&node.key);
        Some(node.key)
    }

    fn unlink(&mut self, id: SlotId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let (newer, older) = (node.newer, node.older);

        match newer.and_then(|n| self.nodes.get_mut(n)) {
            Some(n) => n.older = older,
            None => self.newest = older,
        }
        match older.and_then(|o| self.nodes.get_mut(o)) {
            Some(o) => o.newer = newer,
            None => self.oldest = newer,
        }
    }

    fn link_newest(&mut self, id: SlotId) {
        let previous = self.newest;
        if let Some(node) = self.nodes.get_mut(id) {
            node.newer = None;
            node.older = previous;
        }
        match previous.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) => p.newer = Some(id),
            None => self.oldest = Some(id),
        }
        self.newest = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.index.len(), self.nodes.len());
        assert_eq!(self.newest.is_none(), self.oldest.is_none());

        let mut walked = 0usize;
        let mut expected_newer = None;
        let mut cursor = self.newest;
        while let Some(id) = cursor {
            let node = self.nodes.get(id).expect("chain points at a vacant slot");
            assert_eq!(node.newer, expected_newer, "broken back link");
            assert_eq!(self.index.get(&node.key), Some(&id), "index disagrees");
            if node.older.is_none() {
                assert_eq!(self.oldest, Some(id));
            }
            walked += 1;
            assert!(walked <= self.nodes.len(), "cycle in recency chain");
            expected_newer = Some(id);
            cursor = node.older;
        }
        assert_eq!(walked, self.nodes.len());
    }
}

impl<K> Default for RecencyList<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over keys from most to least recently used.
pub struct Iter<'a, K> {
    nodes: &'a SlotArena<Node<K>>,
    next: Option<SlotId>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.older;
        Some(&node.key)
    }
}
