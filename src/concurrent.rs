//! Thread-safe wrapper around any cache.
//!
//! [`ConcurrentCache`] puts a cache behind one `parking_lot::Mutex` inside an
//! `Arc`. Clones share the same cache. Every call holds the lock for its whole
//! duration, so each `put` or `get` is atomic with respect to the others,
//! eviction and discard notification included.
//!
//! A mutex rather than a read-write lock: `get` updates recency and frequency
//! metadata, so reads need exclusive access too.
//!
//! ```
//! use std::thread;
//!
//! use evictkit::concurrent::ConcurrentCache;
//! use evictkit::listener::NoopListener;
//! use evictkit::policy::lru::LruCache;
//!
//! let cache = ConcurrentCache::new(LruCache::with_listener(64, NoopListener).unwrap());
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|t| {
//!         let cache = cache.clone();
//!         thread::spawn(move || {
//!             for i in 0..16 {
//!                 cache.insert(t * 100 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 64);
//! assert_eq!(cache.get(&301), Some(1));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::CoreCache;

/// Shared handle to a cache `C` storing `V` under `K`.
pub struct ConcurrentCache<K, V, C> {
    inner: Arc<Mutex<C>>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C> Clone for ConcurrentCache<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<K, V, C> ConcurrentCache<K, V, C>
where
    C: CoreCache<K, V>,
{
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
            _marker: PhantomData,
        }
    }

    /// Runs `f` with exclusive access to the wrapped cache.
    ///
    /// Use this to combine several operations atomically or to read values
    /// without cloning them.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Returns the wrapped cache if this is the last handle.
    pub fn try_into_inner(self) -> Result<C, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner()),
            Err(inner) => Err(Self {
                inner,
                _marker: PhantomData,
            }),
        }
    }

    pub fn put(&self, key: Option<K>, value: Option<V>) {
        self.inner.lock().put(key, value);
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Returns a clone of the value, recording the access.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// [`get`](Self::get) for a key that may be absent.
    pub fn lookup(&self, key: Option<&K>) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().lookup(key).cloned()
    }

    /// Returns a clone of the value without recording an access.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<K, V, C: fmt::Debug> fmt::Debug for ConcurrentCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(guard) => f.debug_tuple("ConcurrentCache").field(&*guard).finish(),
            None => f.write_str("ConcurrentCache(<locked>)"),
        }
    }
}
