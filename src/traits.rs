//! # Cache Traits
//!
//! The shared contract of every cache in this crate, split the way callers
//! use it: [`CoreCache`] is the `put`/`get` surface every cache offers, and
//! [`EvictingCache`] adds the inspection that only bounded caches can answer.
//!
//! ## Architecture
//!
//! ```text
//!                          ┌─────────────────────────────────────────┐
//!                          │            CoreCache<K, V>              │
//!                          │                                         │
//!                          │  put(&mut, Option<K>, Option<V>)        │
//!                          │  insert(&mut, K, V) → Option<V>         │
//!                          │  get(&mut, &K) → Option<&V>             │
//!                          │  lookup(&mut, Option<&K>) → Option<&V>  │
//!                          │  peek(&, &K) → Option<&V>               │
//!                          │  contains(&, &K) → bool                 │
//!                          │  len / is_empty / capacity / clear      │
//!                          └──────────────────┬──────────────────────┘
//!                                             │
//!                     ┌───────────────────────┴───────────────────────┐
//!                     │                                               │
//!                     ▼                                               ▼
//!   ┌─────────────────────────────────┐             ┌─────────────────────────────────┐
//!   │        BasicCache<K, V>         │             │      EvictingCache<K, V>        │
//!   │                                 │             │                                 │
//!   │  unbounded, never evicts        │             │  peek_victim() → Option<&K>     │
//!   │                                 │             │  policy_name() → &'static str   │
//!   └─────────────────────────────────┘             └────────────────┬────────────────┘
//!                                                                    │
//!                                     ┌──────────────────────────────┴──────────┐
//!                                     ▼                                         ▼
//!                       ┌──────────────────────────┐              ┌──────────────────────────┐
//!                       │  PolicyCache<K, V, P, L> │              │     Cache<K, V, L>       │
//!                       │  (one per tracker)       │              │  (runtime policy choice) │
//!                       └──────────────────────────┘              └──────────────────────────┘
//! ```
//!
//! ## Absent keys and values
//!
//! [`put`](CoreCache::put) and [`lookup`](CoreCache::lookup) take `Option`
//! arguments so callers holding possibly-missing data can pass it straight
//! through: a `None` key or value makes `put` a no-op and `lookup` a miss.
//! [`insert`](CoreCache::insert) and [`get`](CoreCache::get) are the typed
//! core that the optional forms delegate to.
//!
//! ## Example
//!
//! ```
//! use evictkit::traits::CoreCache;
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::listener::NoopListener;
//!
//! fn warm<C: CoreCache<u32, String>>(cache: &mut C, items: &[(u32, &str)]) {
//!     for (key, value) in items {
//!         cache.insert(*key, value.to_string());
//!     }
//! }
//!
//! let mut cache = FifoCache::with_listener(4, NoopListener).unwrap();
//! warm(&mut cache, &[(1, "one"), (2, "two")]);
//! assert_eq!(cache.len(), 2);
//!
//! cache.put(None, Some("ignored".to_string()));
//! cache.put(Some(3), None);
//! assert_eq!(cache.len(), 2);
//! ```

/// Operations every cache supports.
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// Overwriting an existing key never evicts. A new key inserted into a
    /// full cache evicts exactly one entry first.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    ///
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Inserts when both arguments are present; otherwise does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.put(Some("a"), Some(1));
    /// cache.put(None, Some(2));
    /// cache.put(Some("b"), None);
    ///
    /// assert_eq!(cache.len(), 1);
    /// assert!(!cache.contains(&"b"));
    /// ```
    fn put(&mut self, key: Option<K>, value: Option<V>) {
        if let (Some(key), Some(value)) = (key, value) {
            self.insert(key, value);
        }
    }

    /// Gets a reference to a value by key.
    ///
    /// Counts as an access for recency and frequency based policies. Use
    /// [`peek`](Self::peek) to read without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// [`get`](Self::get) for a key that may be absent.
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::mru::MruCache;
    ///
    /// let mut cache = MruCache::new(2);
    /// cache.insert(1, "one");
    ///
    /// assert_eq!(cache.lookup(Some(&1)), Some(&"one"));
    /// assert_eq!(cache.lookup(None), None);
    /// ```
    fn lookup(&mut self, key: Option<&K>) -> Option<&V> {
        match key {
            Some(key) => self.get(key),
            None => None,
        }
    }

    /// Reads a value without recording an access.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache holds.
    fn capacity(&self) -> usize;

    /// Removes all entries without treating them as evictions.
    fn clear(&mut self);
}

/// Bounded caches that pick a victim when full.
pub trait EvictingCache<K, V>: CoreCache<K, V> {
    /// The key the next overflowing insert would evict.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::{CoreCache, EvictingCache};
    /// use evictkit::policy::lifo::LifoCache;
    ///
    /// let mut cache = LifoCache::new(3);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    ///
    /// assert_eq!(cache.peek_victim(), Some(&"b"));
    /// ```
    fn peek_victim(&self) -> Option<&K>;

    /// Short lowercase name of the eviction policy, e.g. `"lfu"`.
    fn policy_name(&self) -> &'static str;
}
