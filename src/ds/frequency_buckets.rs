//! Frequency buckets for O(1) LFU tracking with LRU tie-breaking.
//!
//! Keys are grouped into buckets by access count. Buckets form a chain in
//! ascending count order starting at `lowest`, and only counts that some key
//! currently has get a bucket. Every entry points at its bucket, so moving a
//! key to the next count never searches: the target is either the bucket
//! right above the current one or a new bucket spliced in between.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FrequencyBuckets<K> Layout                           │
//! │                                                                             │
//! │   index: FxHashMap<K, SlotId>           entries: SlotArena<Entry<K>>        │
//! │   buckets: SlotArena<Bucket>            lowest: Option<SlotId>              │
//! │                                                                             │
//! │   lowest                                                                    │
//! │     │                                                                       │
//! │     ▼                                                                       │
//! │   ┌─────────┐ higher  ┌─────────┐                                           │
//! │   │ count 1 │───────► │ count 3 │                                           │
//! │   └─────────┘ ◄───────└─────────┘                                           │
//! │     newest ─► [c] ─► [b] ◄─ oldest      newest ─► [a] ◄─ oldest             │
//! │                       ↑                                                     │
//! │                     EVICT                                                   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A key enters a bucket only when it is accessed (inserted or touched), and
//! any later access moves it up. The order inside one bucket is therefore
//! the order of the keys' last accesses, and the oldest end is the least
//! recently used key among all keys sharing that count.
//!
//! | Operation   | Time |
//! |-------------|------|
//! | `insert`    | O(1) |
//! | `touch`     | O(1) |
//! | `pop_min`   | O(1) |
//! | `frequency` | O(1) |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("a");
//! freq.insert("b");
//! freq.insert("c");
//!
//! freq.touch(&"a"); // count 2
//! freq.touch(&"b"); // count 2, touched after "a"
//!
//! // "c" is alone at the minimum count
//! assert_eq!(freq.pop_min(), Some(("c", 1)));
//! // "a" and "b" tie at 2; "a" was used less recently
//! assert_eq!(freq.pop_min(), Some(("a", 2)));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Entry<K> {
    key: K,
    bucket: SlotId,
    newer: Option<SlotId>,
    older: Option<SlotId>,
}

#[derive(Debug)]
struct Bucket {
    count: u64,
    newest: Option<SlotId>,
    oldest: Option<SlotId>,
    lower: Option<SlotId>,
    higher: Option<SlotId>,
}

/// Access counts for a set of keys, ordered for LFU eviction.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    index: FxHashMap<K, SlotId>,
    entries: SlotArena<Entry<K>>,
    buckets: SlotArena<Bucket>,
    lowest: Option<SlotId>,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: SlotArena::with_capacity(capacity),
            // Counts cluster low; a handful of buckets covers most workloads.
            buckets: SlotArena::with_capacity(capacity.min(16)),
            lowest: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let entry = self.entries.get(*self.index.get(key)?)?;
        self.buckets.get(entry.bucket).map(|bucket| bucket.count)
    }

    /// Returns the lowest count any tracked key has.
    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.get(self.lowest?).map(|bucket| bucket.count)
    }

    /// Returns the next eviction candidate and its count without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let bucket = self.buckets.get(self.lowest?)?;
        let entry = self.entries.get(bucket.oldest?)?;
        Some((&entry.key, bucket.count))
    }

    /// Starts tracking `key` with a count of 1.
    ///
    /// Returns `false` if the key is already tracked (its count is unchanged).
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let lowest = self.lowest;
        let bucket = match lowest {
            Some(id) if self.count_of(id) == Some(1) => id,
            lowest => self.splice_bucket(1, None, lowest),
        };
        let id = self.entries.insert(Entry {
            key: key.clone(),
            bucket,
            newer: None,
            older: None,
        });
        self.attach_newest(bucket, id);
        self.index.insert(key, id);
        true
    }

    /// Increments the count of `key` and returns the new value.
    ///
    /// The key becomes the newest member of its new bucket. At `u64::MAX`
    /// the count saturates and only the recency position changes.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let from = self.entries.get(id)?.bucket;
        let (count, higher) = {
            let bucket = self.buckets.get(from)?;
            (bucket.count, bucket.higher)
        };

        if count == u64::MAX {
            self.detach(id);
            self.attach_newest(from, id);
            return Some(count);
        }

        let next = count + 1;
        let to = match higher {
            Some(h) if self.count_of(h) == Some(next) => h,
            _ => self.splice_bucket(next, Some(from), higher),
        };
        self.detach(id);
        self.drop_if_empty(from);
        self.attach_newest(to, id);
        Some(next)
    }

    /// Removes and returns the least recently used key among those with the
    /// lowest count, together with that count.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let id = self.buckets.get(self.lowest?)?.oldest?;
        let (key, count) = self.release(id)?;
        self.index.remove(&key);
        Some((key, count))
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        self.buckets.clear();
        self.lowest = None;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.index.len(), self.entries.len());

        let mut seen_entries = 0usize;
        let mut seen_buckets = 0usize;
        let mut below: Option<(SlotId, u64)> = None;
        let mut cursor = self.lowest;

        while let Some(bid) = cursor {
            let bucket = self.buckets.get(bid).expect("chain points at a vacant bucket");
            assert_eq!(bucket.lower, below.map(|(id, _)| id), "broken lower link");
            if let Some((_, count)) = below {
                assert!(bucket.count > count, "bucket counts out of order");
            }
            assert!(bucket.newest.is_some(), "empty bucket left in chain");

            let mut newer = None;
            let mut entry_cursor = bucket.newest;
            while let Some(eid) = entry_cursor {
                let entry = self.entries.get(eid).expect("bucket points at a vacant entry");
                assert_eq!(entry.bucket, bid);
                assert_eq!(entry.newer, newer);
                assert_eq!(self.index.get(&entry.key), Some(&eid));
                newer = Some(eid);
                entry_cursor = entry.older;
                seen_entries += 1;
            }
            assert_eq!(bucket.oldest, newer);

            seen_buckets += 1;
            below = Some((bid, bucket.count));
            cursor = bucket.higher;
        }

        assert_eq!(seen_entries, self.entries.len());
        assert_eq!(seen_buckets, self.buckets.len());
    }

    fn count_of(&self, bucket: SlotId) -> Option<u64> {
        self.buckets.get(bucket).map(|b| b.count)
    }

    /// Creates a bucket for `count` between `lower` and `higher`.
    fn splice_bucket(
        &mut self,
        count: u64,
        lower: Option<SlotId>,
        higher: Option<SlotId>,
    ) -> SlotId {
        let id = self.buckets.insert(Bucket {
            count,
            newest: None,
            oldest: None,
            lower,
            higher,
        });
        match lower.and_then(|l| self.buckets.get_mut(l)) {
            Some(l) => l.higher = Some(id),
            None => self.lowest = Some(id),
        }
        if let Some(h) = higher.and_then(|h| self.buckets.get_mut(h)) {
            h.lower = Some(id);
        }
        id
    }

    fn drop_if_empty(&mut self, id: SlotId) {
        let Some(bucket) = self.buckets.get(id) else {
            return;
        };
        if bucket.newest.is_some() {
            return;
        }
        let (lower, higher) = (bucket.lower, bucket.higher);
        match lower.and_then(|l| self.buckets.get_mut(l)) {
            Some(l) => l.higher = higher,
            None => self.lowest = higher,
        }
        if let Some(h) = higher.and_then(|h| self.buckets.get_mut(h)) {
            h.lower = lower;
        }
        self.buckets.remove(id);
    }

    /// Unlinks entry `id` from its bucket's recency list.
    fn detach(&mut self, id: SlotId) {
        let Some(entry) = self.entries.get(id) else {
            return;
        };
        let (bucket, newer, older) = (entry.bucket, entry.newer, entry.older);

        match newer.and_then(|n| self.entries.get_mut(n)) {
            Some(n) => n.older = older,
            None => {
                if let Some(b) = self.buckets.get_mut(bucket) {
                    b.newest = older;
                }
            }
        }
        match older.and_then(|o| self.entries.get_mut(o)) {
            Some(o) => o.newer = newer,
            None => {
                if let Some(b) = self.buckets.get_mut(bucket) {
                    b.oldest = newer;
                }
            }
        }
    }

    fn attach_newest(&mut self, bucket: SlotId, id: SlotId) {
        let Some(b) = self.buckets.get_mut(bucket) else {
            return;
        };
        let previous = b.newest.replace(id);
        if previous.is_none() {
            b.oldest = Some(id);
        }
        if let Some(p) = previous.and_then(|p| self.entries.get_mut(p)) {
            p.newer = Some(id);
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.bucket = bucket;
            entry.newer = None;
            entry.older = previous;
        }
    }

    /// Frees entry `id` and, if it was the last of its count, its bucket.
    fn release(&mut self, id: SlotId) -> Option<(K, u64)> {
        let bucket = self.entries.get(id)?.bucket;
        let count = self.count_of(bucket)?;
        self.detach(id);
        self.drop_if_empty(bucket);
        self.entries.remove(id).map(|entry| (entry.key, count))
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // Counting
    // ==============================================

    mod counting {
        use super::*;

        #[test]
        fn insert_starts_at_one_and_ignores_duplicates() {
            let mut freq = FrequencyBuckets::new();
            assert!(freq.insert("a"));
            assert!(!freq.insert("a"));
            assert_eq!(freq.frequency(&"a"), Some(1));
            assert_eq!(freq.len(), 1);
            freq.debug_validate_invariants();
        }

        #[test]
        fn touch_moves_up_one_count() {
            let mut freq = FrequencyBuckets::new();
            freq.insert("a");
            freq.insert("b");
            assert_eq!(freq.touch(&"a"), Some(2));
            assert_eq!(freq.touch(&"a"), Some(3));
            assert_eq!(freq.touch(&"zzz"), None);
            assert_eq!(freq.frequency(&"b"), Some(1));
            assert_eq!(freq.min_freq(), Some(1));
            freq.debug_validate_invariants();

            assert_eq!(freq.pop_min(), Some(("b", 1)));
            assert_eq!(freq.min_freq(), Some(3));
            freq.debug_validate_invariants();
        }

        #[test]
        fn pop_min_reports_last_count() {
            let mut freq = FrequencyBuckets::with_capacity(4);
            freq.insert("a");
            freq.touch(&"a");
            assert_eq!(freq.pop_min(), Some(("a", 2)));
            assert_eq!(freq.pop_min(), None);
            assert!(freq.is_empty());
            assert!(!freq.contains(&"a"));
            assert_eq!(freq.min_freq(), None);
            freq.debug_validate_invariants();
        }

        #[test]
        fn clear_forgets_everything() {
            let mut freq = FrequencyBuckets::new();
            freq.insert(1);
            freq.insert(2);
            freq.touch(&2);
            freq.clear();
            assert!(freq.is_empty());
            assert_eq!(freq.peek_min(), None);
            assert_eq!(freq.pop_min(), None);
            assert!(freq.insert(2));
            assert_eq!(freq.frequency(&2), Some(1));
            freq.debug_validate_invariants();
        }
    }

    // ==============================================
    // Victim Selection
    // ==============================================

    mod victim_selection {
        use super::*;

        #[test]
        fn lowest_count_leaves_first() {
            let mut freq = FrequencyBuckets::new();
            freq.insert("hot");
            freq.insert("cold");
            freq.touch(&"hot");
            freq.touch(&"hot");

            assert_eq!(freq.peek_min(), Some((&"cold", 1)));
            assert_eq!(freq.pop_min(), Some(("cold", 1)));
            assert_eq!(freq.pop_min(), Some(("hot", 3)));
            assert_eq!(freq.pop_min(), None);
        }

        #[test]
        fn untouched_ties_leave_in_insertion_order() {
            let mut freq = FrequencyBuckets::new();
            for key in ["a", "b", "c"] {
                freq.insert(key);
            }
            assert_eq!(freq.pop_min(), Some(("a", 1)));
            assert_eq!(freq.pop_min(), Some(("b", 1)));
            assert_eq!(freq.pop_min(), Some(("c", 1)));
        }

        #[test]
        fn touched_ties_leave_least_recent_first() {
            let mut freq = FrequencyBuckets::new();
            freq.insert("a");
            freq.insert("b");
            // b reaches 2 before a does
            freq.touch(&"b");
            freq.touch(&"a");

            assert_eq!(freq.peek_min(), Some((&"b", 2)));
            assert_eq!(freq.pop_min(), Some(("b", 2)));
            assert_eq!(freq.pop_min(), Some(("a", 2)));
            freq.debug_validate_invariants();
        }

        #[test]
        fn gaps_between_counts_are_skipped() {
            let mut freq = FrequencyBuckets::new();
            freq.insert("a");
            for _ in 0..4 {
                freq.touch(&"a");
            }
            freq.insert("b");
            freq.touch(&"b");
            freq.touch(&"b");

            assert_eq!(freq.min_freq(), Some(3));
            assert_eq!(freq.pop_min(), Some(("b", 3)));
            assert_eq!(freq.min_freq(), Some(5));
            freq.debug_validate_invariants();
        }

        #[test]
        fn new_key_becomes_lowest() {
            let mut freq = FrequencyBuckets::new();
            freq.insert("a");
            freq.touch(&"a");
            assert_eq!(freq.min_freq(), Some(2));
            freq.insert("b");
            assert_eq!(freq.min_freq(), Some(1));
            assert_eq!(freq.peek_min(), Some((&"b", 1)));
            freq.debug_validate_invariants();
        }
    }

    // ==============================================
    // Chain Maintenance
    // ==============================================

    #[test]
    fn mixed_operations_keep_chain_consistent() {
        let mut freq = FrequencyBuckets::new();
        for key in 0..16u32 {
            freq.insert(key);
            for _ in 0..(key % 5) {
                freq.touch(&key);
            }
            freq.debug_validate_invariants();
        }
        for _ in 0..5 {
            freq.pop_min();
            freq.debug_validate_invariants();
        }
        for key in (0..16u32).step_by(3) {
            freq.insert(key);
            freq.touch(&key);
            freq.debug_validate_invariants();
        }
        let mut last = 0;
        while let Some((_, count)) = freq.pop_min() {
            assert!(count >= last);
            last = count;
            freq.debug_validate_invariants();
        }
        assert!(freq.is_empty());
    }
}
