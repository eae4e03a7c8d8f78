//! Runtime policy selection.
//!
//! [`CacheBuilder`] creates a [`Cache`] whose eviction policy is chosen by a
//! [`CachePolicy`] value, e.g. one parsed from configuration, instead of by a
//! type parameter.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let policy: CachePolicy = "LFU".parse().unwrap();
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(policy);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.policy(), CachePolicy::Lfu);
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::config::{validate_capacity, CacheConfig};
use crate::error::{ConfigError, InvariantError};
use crate::listener::{DiscardListener, LogListener};
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lifo::LifoCache;
use crate::policy::lru::LruCache;
use crate::policy::mru::MruCache;
use crate::traits::{CoreCache, EvictingCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// First In, First Out eviction.
    Fifo,
    /// Last In, First Out eviction.
    Lifo,
    /// Least Recently Used eviction.
    #[default]
    Lru,
    /// Most Recently Used eviction.
    Mru,
    /// Least Frequently Used eviction, least recently used among ties.
    Lfu,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 5] = [
        CachePolicy::Fifo,
        CachePolicy::Lifo,
        CachePolicy::Lru,
        CachePolicy::Mru,
        CachePolicy::Lfu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
            Self::Lru => "lru",
            Self::Mru => "mru",
            Self::Lfu => "lfu",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "lifo" => Ok(Self::Lifo),
            "lru" => Ok(Self::Lru),
            "mru" => Ok(Self::Mru),
            "lfu" => Ok(Self::Lfu),
            other => Err(ConfigError::unknown_policy(other)),
        }
    }
}

/// Cache with a policy picked at runtime.
pub struct Cache<K, V, L = LogListener> {
    inner: CacheInner<K, V, L>,
}

enum CacheInner<K, V, L> {
    Fifo(FifoCache<K, V, L>),
    Lifo(LifoCache<K, V, L>),
    Lru(LruCache<K, V, L>),
    Mru(MruCache<K, V, L>),
    Lfu(LfuCache<K, V, L>),
}

/// Forwards an expression to whichever policy cache is active.
macro_rules! dispatch {
    ($inner:expr, $cache:ident => $body:expr) => {
        match $inner {
            CacheInner::Fifo($cache) => $body,
            CacheInner::Lifo($cache) => $body,
            CacheInner::Lru($cache) => $body,
            CacheInner::Mru($cache) => $body,
            CacheInner::Lfu($cache) => $body,
        }
    };
}

impl<K, V, L> Cache<K, V, L>
where
    K: Eq + Hash + Clone,
{
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Fifo(_) => CachePolicy::Fifo,
            CacheInner::Lifo(_) => CachePolicy::Lifo,
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Mru(_) => CachePolicy::Mru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    pub fn listener(&self) -> &L {
        dispatch!(&self.inner, cache => cache.listener())
    }

    pub fn listener_mut(&mut self) -> &mut L {
        dispatch!(&mut self.inner, cache => cache.listener_mut())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        dispatch!(&self.inner, cache => cache.check_invariants())
    }
}

impl<K, V, L> CoreCache<K, V> for Cache<K, V, L>
where
    K: Eq + Hash + Clone,
    L: DiscardListener<K, V>,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        dispatch!(&mut self.inner, cache => cache.insert(key, value))
    }

    fn put(&mut self, key: Option<K>, value: Option<V>) {
        dispatch!(&mut self.inner, cache => cache.put(key, value))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(&mut self.inner, cache => cache.get(key))
    }

    fn peek(&self, key: &K) -> Option<&V> {
        dispatch!(&self.inner, cache => cache.peek(key))
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(&self.inner, cache => cache.contains(key))
    }

    fn len(&self) -> usize {
        dispatch!(&self.inner, cache => cache.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(&self.inner, cache => cache.capacity())
    }

    fn clear(&mut self) {
        dispatch!(&mut self.inner, cache => cache.clear())
    }
}

impl<K, V, L> EvictingCache<K, V> for Cache<K, V, L>
where
    K: Eq + Hash + Clone,
    L: DiscardListener<K, V>,
{
    fn peek_victim(&self) -> Option<&K> {
        dispatch!(&self.inner, cache => cache.peek_victim())
    }

    fn policy_name(&self) -> &'static str {
        self.policy().as_str()
    }
}

impl<K, V, L> fmt::Debug for Cache<K, V, L>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(&self.inner, cache => fmt::Debug::fmt(cache, f))
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder<L = LogListener> {
    capacity: usize,
    listener: L,
}

impl CacheBuilder<LogListener> {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            listener: LogListener,
        }
    }

    /// Starts from the capacity in `config`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Builds the cache `config` describes, policy included.
    ///
    /// ```
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    /// use evictkit::config::CacheConfig;
    ///
    /// let config = CacheConfig::new(8, CachePolicy::Mru).unwrap();
    /// let cache = CacheBuilder::build_from_config::<u32, u32>(&config).unwrap();
    /// assert_eq!(cache.policy(), CachePolicy::Mru);
    /// ```
    pub fn build_from_config<K, V>(config: &CacheConfig) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        config.validate()?;
        Self::from_config(config).try_build(config.policy)
    }
}

impl<L> CacheBuilder<L> {
    /// Replaces the listener that receives evicted entries.
    pub fn listener<L2>(self, listener: L2) -> CacheBuilder<L2> {
        CacheBuilder {
            capacity: self.capacity,
            listener,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. Use [`try_build`](Self::try_build)
    /// to get a [`ConfigError`] instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    /// use evictkit::listener::RecordingListener;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = CacheBuilder::new(1)
    ///     .listener(RecordingListener::new())
    ///     .build::<u64, &str>(CachePolicy::Fifo);
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    /// assert_eq!(cache.listener().keys(), &[1]);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V, L>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build a cache with the specified policy, returning an error on
    /// invalid capacity.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V, L>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        validate_capacity(self.capacity)?;
        let Self { capacity, listener } = self;
        let inner = match policy {
            CachePolicy::Fifo => CacheInner::Fifo(FifoCache::with_listener(capacity, listener)?),
            CachePolicy::Lifo => CacheInner::Lifo(LifoCache::with_listener(capacity, listener)?),
            CachePolicy::Lru => CacheInner::Lru(LruCache::with_listener(capacity, listener)?),
            CachePolicy::Mru => CacheInner::Mru(MruCache::with_listener(capacity, listener)?),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::with_listener(capacity, listener)?),
        };
        Ok(Cache { inner })
    }
}
