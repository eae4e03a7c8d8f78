pub use crate::basic::BasicCache;
pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::cache::PolicyCache;
pub use crate::concurrent::ConcurrentCache;
pub use crate::config::{CacheConfig, DEFAULT_CAPACITY};
pub use crate::error::{ConfigError, ConfigErrorKind, InvariantError};
pub use crate::listener::{
    DiscardListener, LogListener, NoopListener, RecordingListener, StdoutListener,
};
#[cfg(feature = "metrics")]
pub use crate::metrics::CacheMetricsSnapshot;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lifo::LifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::OrderTracker;
pub use crate::traits::{CoreCache, EvictingCache};
