//! Eviction policies.
//!
//! Each policy is an [`OrderTracker`]: the per-policy metadata that decides
//! which key leaves when a full cache admits a new one. Trackers know only
//! keys; values live in the [`Store`](crate::store::Store) owned by
//! [`PolicyCache`](crate::cache::PolicyCache), which drives the tracker on
//! every insert, overwrite and hit.
//!
//! | Module   | Tracker        | Victim                                   | `get` reorders |
//! |----------|----------------|------------------------------------------|----------------|
//! | [`fifo`] | `FifoTracker`  | oldest insertion                         | no             |
//! | [`lifo`] | `LifoTracker`  | newest insertion                         | no             |
//! | [`lru`]  | `LruTracker`   | least recently accessed                  | yes            |
//! | [`mru`]  | `MruTracker`   | most recently accessed                   | yes            |
//! | [`lfu`]  | `LfuTracker`   | lowest access count, LRU among ties      | yes            |
//!
//! Each module also exports a cache alias, e.g. [`lru::LruCache`], pairing
//! its tracker with the shared facade.

pub mod fifo;
pub mod lfu;
pub mod lifo;
pub mod lru;
pub mod mru;

pub use fifo::{FifoCache, FifoTracker};
pub use lfu::{LfuCache, LfuTracker};
pub use lifo::{LifoCache, LifoTracker};
pub use lru::{LruCache, LruTracker};
pub use mru::{MruCache, MruTracker};

/// Eviction metadata for one cache.
///
/// The owning cache guarantees the call pattern: `record_insert` only for
/// keys the tracker does not hold, `record_update` and `record_hit` only for
/// keys it does, and `pop_victim` only when the cache is full. Keys returned
/// by `pop_victim` are no longer tracked.
pub trait OrderTracker<K> {
    /// Lowercase policy name reported by the cache.
    const POLICY: &'static str;

    /// Creates an empty tracker sized for `capacity` keys.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// A new key entered the cache.
    fn record_insert(&mut self, key: K);

    /// An existing key's value was overwritten.
    fn record_update(&mut self, key: &K);

    /// An existing key was read through `get`.
    fn record_hit(&mut self, key: &K);

    /// The key `pop_victim` would return, without removing it.
    fn peek_victim(&self) -> Option<&K>;

    /// Removes and returns the eviction victim.
    fn pop_victim(&mut self) -> Option<K>;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}
