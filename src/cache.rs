//! The cache facade shared by every eviction policy.
//!
//! [`PolicyCache`] composes a bounded [`Store`] with an [`OrderTracker`] and a
//! [`DiscardListener`]. The store holds values, the tracker holds eviction
//! metadata, and the facade keeps the two in step on every call.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                     PolicyCache<K, V, P, L> Layout                          │
//! │                                                                             │
//! │   ┌──────────────────────────┐        ┌─────────────────────────────────┐   │
//! │   │  store: Store<K, V>      │        │  tracker: P (OrderTracker<K>)   │   │
//! │   │    key → value           │        │    FIFO queue / LIFO stack /    │   │
//! │   │    len <= capacity       │        │    recency list / freq buckets  │   │
//! │   └──────────────────────────┘        └─────────────────────────────────┘   │
//! │                                                                             │
//! │   ┌──────────────────────────┐        ┌─────────────────────────────────┐   │
//! │   │  listener: L             │        │  metrics (feature = "metrics")  │   │
//! │   │    DISCARD: <key>        │        │    hits / misses / evictions    │   │
//! │   └──────────────────────────┘        └─────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow (new key, cache full)
//! ─────────────────────────────────
//!
//!   insert("new_key", value):
//!     1. Store lookup - not found
//!     2. tracker.pop_victim()          → victim key
//!     3. store.remove(victim)          → victim value
//!     4. listener.on_discard(victim, value)
//!     5. store.try_insert(new_key, value)
//!     6. tracker.record_insert(new_key)
//!
//! Update Flow (existing key)
//! ──────────────────────────
//!
//!   insert("existing_key", value):
//!     1. Replace the value in place
//!     2. tracker.record_update(key)    (no eviction, no notification)
//!
//! Access Flow
//! ───────────
//!
//!   get("key"):
//!     hit  → tracker.record_hit(key), return &value
//!     miss → None, tracker untouched
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::cache::PolicyCache;
//! use evictkit::listener::RecordingListener;
//! use evictkit::policy::LruTracker;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache: PolicyCache<&str, i32, LruTracker<&str>, _> =
//!     PolicyCache::with_listener(2, RecordingListener::new()).unwrap();
//!
//! cache.put(Some("A"), Some(1));
//! cache.put(Some("B"), Some(2));
//! cache.get(&"A");
//! cache.put(Some("C"), Some(3));
//!
//! assert_eq!(cache.listener().keys(), &["B"]);
//! assert!(cache.check_invariants().is_ok());
//! ```

use std::fmt;
use std::hash::Hash;

use crate::config::{validate_capacity, CacheConfig, DEFAULT_CAPACITY};
use crate::error::{ConfigError, InvariantError};
use crate::listener::{DiscardListener, LogListener};
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsRecorder, CacheMetricsSnapshot, MetricsSnapshotProvider,
};
use crate::policy::OrderTracker;
use crate::store::{Store, StoreFull, MAX_PREALLOC};
use crate::traits::{CoreCache, EvictingCache};

/// Bounded cache evicting by the order tracker `P`, reporting evictions to `L`.
pub struct PolicyCache<K, V, P, L = LogListener> {
    store: Store<K, V>,
    tracker: P,
    listener: L,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V, P> PolicyCache<K, V, P, LogListener>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
{
    /// Creates a cache holding at most `capacity` entries, logging evictions.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get a
    /// [`ConfigError`] instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning an error on invalid capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_listener(capacity, LogListener)
    }

    /// Creates a cache sized by `config`.
    ///
    /// Only the capacity is read; the policy is fixed by `P`. Use
    /// [`CacheBuilder`](crate::builder::CacheBuilder) to pick the policy at
    /// runtime.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::try_new(config.capacity)
    }
}

impl<K, V, P, L> PolicyCache<K, V, P, L>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
{
    /// Creates a cache that hands evicted entries to `listener`.
    pub fn with_listener(capacity: usize, listener: L) -> Result<Self, ConfigError> {
        validate_capacity(capacity)?;
        tracing::debug!(policy = P::POLICY, capacity, "cache created");
        Ok(Self {
            store: Store::new(capacity),
            tracker: P::with_capacity(capacity.min(MAX_PREALLOC)),
            listener,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Eviction metadata, e.g. LFU access counts.
    pub fn tracker(&self) -> &P {
        &self.tracker
    }

    /// Iterates over entries in arbitrary order without recording accesses.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter()
    }

    /// Verifies that the store and the tracker describe the same key set.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.store.len() > self.store.capacity() {
            return Err(InvariantError::new(format!(
                "store holds {} entries, capacity is {}",
                self.store.len(),
                self.store.capacity()
            )));
        }
        if self.tracker.len() != self.store.len() {
            return Err(InvariantError::new(format!(
                "{} tracker holds {} keys, store holds {}",
                P::POLICY,
                self.tracker.len(),
                self.store.len()
            )));
        }
        if let Some(missing) = self.store.keys().position(|key| !self.tracker.contains(key)) {
            return Err(InvariantError::new(format!(
                "{} tracker is missing stored key #{missing}",
                P::POLICY
            )));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_check(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("{}", e);
        }
    }
}

impl<K, V, P, L> PolicyCache<K, V, P, L>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
    L: DiscardListener<K, V>,
{
    fn evict_one(&mut self) {
        let Some(victim) = self.tracker.pop_victim() else {
            return;
        };
        match self.store.remove(&victim) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
                self.listener.on_discard(victim, value);
            }
            None => {
                tracing::warn!(policy = P::POLICY, "evicted key was not in the store");
            }
        }
    }
}

impl<K, V, P, L> CoreCache<K, V> for PolicyCache<K, V, P, L>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
    L: DiscardListener<K, V>,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(slot) = self.store.get_mut(&key) {
            let previous = std::mem::replace(slot, value);
            self.tracker.record_update(&key);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return Some(previous);
        }

        if self.store.is_full() {
            self.evict_one();
        }

        match self.store.try_insert(key.clone(), value) {
            Ok(_) => {
                self.tracker.record_insert(key);
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
            }
            Err(StoreFull) => {
                tracing::warn!(
                    policy = P::POLICY,
                    "no eviction victim available; insert dropped"
                );
            }
        }

        #[cfg(debug_assertions)]
        self.debug_check();

        None
    }

    fn put(&mut self, key: Option<K>, value: Option<V>) {
        match (key, value) {
            (Some(key), Some(value)) => {
                self.insert(key, value);
            }
            (key, value) => {
                tracing::trace!(
                    policy = P::POLICY,
                    key_present = key.is_some(),
                    value_present = value.is_some(),
                    "put ignored"
                );
                #[cfg(feature = "metrics")]
                self.metrics.record_put_ignored();
            }
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if self.store.contains(key) {
            self.tracker.record_hit(key);
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();
            self.store.get(key)
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            None
        }
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
        self.tracker.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}

impl<K, V, P, L> EvictingCache<K, V> for PolicyCache<K, V, P, L>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
    L: DiscardListener<K, V>,
{
    fn peek_victim(&self) -> Option<&K> {
        if self.store.is_empty() {
            None
        } else {
            self.tracker.peek_victim()
        }
    }

    fn policy_name(&self) -> &'static str {
        P::POLICY
    }
}

impl<K, V, P> Default for PolicyCache<K, V, P, LogListener>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V, P, L> fmt::Debug for PolicyCache<K, V, P, L>
where
    K: Eq + Hash,
    P: OrderTracker<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyCache")
            .field("policy", &P::POLICY)
            .field("len", &self.store.len())
            .field("capacity", &self.store.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, L> PolicyCache<K, V, P, L>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.store.len(), self.store.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, L> MetricsSnapshotProvider<CacheMetricsSnapshot> for PolicyCache<K, V, P, L>
where
    K: Eq + Hash + Clone,
    P: OrderTracker<K>,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{NoopListener, RecordingListener};
    use crate::policy::{FifoTracker, LfuTracker, LruTracker};

    type Recorded<P> = PolicyCache<&'static str, i32, P, RecordingListener<&'static str>>;

    fn recorded<P: OrderTracker<&'static str>>(capacity: usize) -> Recorded<P> {
        PolicyCache::with_listener(capacity, RecordingListener::new()).unwrap()
    }

    // ==============================================
    // Construction
    // ==============================================

    mod construction {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            let err = PolicyCache::<u32, u32, LruTracker<u32>>::try_new(0).unwrap_err();
            assert!(err.message().contains("capacity"));
            assert!(
                PolicyCache::<u32, u32, LruTracker<u32>, _>::with_listener(0, NoopListener)
                    .is_err()
            );
        }

        #[test]
        #[should_panic(expected = "capacity must be > 0")]
        fn new_panics_on_zero_capacity() {
            let _ = PolicyCache::<u32, u32, FifoTracker<u32>>::new(0);
        }

        #[test]
        fn default_uses_default_capacity() {
            let cache: PolicyCache<u32, u32, LruTracker<u32>> = PolicyCache::default();
            assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
            assert!(cache.is_empty());
        }

        #[test]
        fn from_config_reads_capacity() {
            let config = CacheConfig {
                capacity: 7,
                ..CacheConfig::default()
            };
            let cache: PolicyCache<u32, u32, LfuTracker<u32>> =
                PolicyCache::from_config(&config).unwrap();
            assert_eq!(cache.capacity(), 7);

            let bad = CacheConfig {
                capacity: 0,
                ..CacheConfig::default()
            };
            assert!(PolicyCache::<u32, u32, LfuTracker<u32>>::from_config(&bad).is_err());
        }

        #[test]
        fn huge_capacity_does_not_preallocate() {
            let mut cache: PolicyCache<u32, u32, LruTracker<u32>> =
                PolicyCache::new(usize::MAX / 2);
            cache.insert(1, 1);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn debug_output_names_policy() {
            let cache: PolicyCache<u32, u32, FifoTracker<u32>> = PolicyCache::new(3);
            let rendered = format!("{cache:?}");
            assert!(rendered.contains("fifo"));
            assert!(rendered.contains("capacity: 3"));
        }
    }

    // ==============================================
    // Put / Get Contract
    // ==============================================

    mod put_get {
        use super::*;

        #[test]
        fn put_with_missing_argument_is_noop() {
            let mut cache = recorded::<LruTracker<_>>(2);
            cache.put(None, Some(1));
            cache.put(Some("a"), None);
            cache.put(None, None);
            assert!(cache.is_empty());
            assert!(cache.listener().is_empty());
        }

        #[test]
        fn overwrite_returns_previous_and_never_evicts() {
            let mut cache = recorded::<FifoTracker<_>>(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            assert_eq!(cache.insert("a", 10), Some(1));
            assert_eq!(cache.len(), 2);
            assert!(cache.listener().is_empty());
            assert_eq!(cache.peek(&"a"), Some(&10));
        }

        #[test]
        fn lookup_handles_absent_key() {
            let mut cache = recorded::<LruTracker<_>>(2);
            cache.insert("a", 1);
            assert_eq!(cache.lookup(Some(&"a")), Some(&1));
            assert_eq!(cache.lookup(Some(&"z")), None);
            assert_eq!(cache.lookup(None), None);
        }

        #[test]
        fn peek_does_not_count_as_access() {
            let mut cache = recorded::<LruTracker<_>>(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            assert_eq!(cache.peek(&"a"), Some(&1));
            cache.insert("c", 3);
            assert_eq!(cache.listener().keys(), &["a"]);
        }

        #[test]
        fn iter_visits_every_entry() {
            let mut cache = recorded::<FifoTracker<_>>(3);
            cache.insert("a", 1);
            cache.insert("b", 2);
            let mut entries: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            entries.sort();
            assert_eq!(entries, vec![("a", 1), ("b", 2)]);
        }
    }

    // ==============================================
    // Eviction and Notification
    // ==============================================

    mod eviction {
        use super::*;

        #[test]
        fn one_notification_per_overflowing_insert() {
            let mut cache = recorded::<FifoTracker<_>>(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            assert!(cache.listener().is_empty());

            cache.insert("c", 3);
            cache.insert("d", 4);
            assert_eq!(cache.listener().keys(), &["a", "b"]);
            assert_eq!(cache.len(), 2);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn closure_listener_receives_value() {
            let mut seen = Vec::new();
            {
                let mut cache: PolicyCache<u32, String, FifoTracker<u32>, _> =
                    PolicyCache::with_listener(1, |key: u32, value: String| {
                        seen.push((key, value))
                    })
                    .unwrap();
                cache.insert(1, "one".to_string());
                cache.insert(2, "two".to_string());
            }
            assert_eq!(seen, vec![(1, "one".to_string())]);
        }

        #[test]
        fn peek_victim_matches_next_eviction() {
            let mut cache = recorded::<LruTracker<_>>(2);
            assert_eq!(cache.peek_victim(), None);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.get(&"a");
            assert_eq!(cache.peek_victim(), Some(&"b"));
            cache.insert("c", 3);
            assert_eq!(cache.listener().keys(), &["b"]);
        }

        #[test]
        fn clear_does_not_notify() {
            let mut cache = recorded::<LruTracker<_>>(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.clear();
            assert!(cache.is_empty());
            assert!(cache.listener().is_empty());
            cache.check_invariants().unwrap();

            cache.insert("c", 3);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn listener_mut_allows_draining() {
            let mut cache = recorded::<FifoTracker<_>>(1);
            cache.insert("a", 1);
            cache.insert("b", 2);
            assert_eq!(cache.listener_mut().take(), vec!["a"]);
            assert!(cache.listener().is_empty());
        }
    }

    // ==============================================
    // Custom Trackers
    // ==============================================

    mod custom_tracker {
        use super::*;

        /// Tracks keys but never offers a victim.
        #[derive(Default)]
        struct Pinned {
            keys: Vec<&'static str>,
        }

        impl OrderTracker<&'static str> for Pinned {
            const POLICY: &'static str = "pinned";

            fn with_capacity(capacity: usize) -> Self {
                Self {
                    keys: Vec::with_capacity(capacity),
                }
            }
            fn record_insert(&mut self, key: &'static str) {
                self.keys.push(key);
            }
            fn record_update(&mut self, _key: &&'static str) {}
            fn record_hit(&mut self, _key: &&'static str) {}
            fn peek_victim(&self) -> Option<&&'static str> {
                None
            }
            fn pop_victim(&mut self) -> Option<&'static str> {
                None
            }
            fn contains(&self, key: &&'static str) -> bool {
                self.keys.contains(key)
            }
            fn len(&self) -> usize {
                self.keys.len()
            }
            fn clear(&mut self) {
                self.keys.clear();
            }
        }

        #[test]
        fn tracker_without_victim_drops_insert() {
            let mut cache: PolicyCache<&str, i32, Pinned, _> =
                PolicyCache::with_listener(1, RecordingListener::new()).unwrap();
            cache.insert("a", 1);
            cache.insert("b", 2);

            assert_eq!(cache.len(), 1);
            assert!(cache.contains(&"a"));
            assert!(!cache.contains(&"b"));
            assert!(cache.listener().is_empty());
            assert_eq!(cache.policy_name(), "pinned");
        }
    }

    // ==============================================
    // Metrics
    // ==============================================

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counters_follow_operations() {
            let mut cache = recorded::<LruTracker<_>>(2);
            cache.insert("a", 1);
            cache.insert("a", 2);
            cache.insert("b", 3);
            cache.insert("c", 4);
            cache.get(&"c");
            cache.get(&"a");
            cache.put(None, Some(5));

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.puts_ignored, 1);
            assert_eq!(snap.cache_len, 2);
            assert_eq!(snap.capacity, 2);
        }
    }
}
