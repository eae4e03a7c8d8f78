//! evictkit: bounded in-memory key-value caches with pluggable eviction.
//!
//! One facade, [`PolicyCache`](cache::PolicyCache), drives five eviction
//! policies (FIFO, LIFO, LRU, MRU and LFU with LRU tie-breaking) over a
//! shared bounded store. Each eviction is reported to a
//! [`DiscardListener`](listener::DiscardListener) as `DISCARD: <key>`.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = LfuCache::with_listener(2, RecordingListener::new()).unwrap();
//! cache.put(Some("A"), Some(1));
//! cache.put(Some("B"), Some(2));
//! cache.get(&"A");
//! cache.put(Some("C"), Some(3));
//!
//! assert_eq!(cache.listener().keys(), &["B"]);
//! assert_eq!(cache.get(&"B"), None);
//! ```

pub mod basic;
pub mod builder;
pub mod cache;
pub mod concurrent;
pub mod config;
pub mod ds;
pub mod error;
pub mod listener;
pub mod policy;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
