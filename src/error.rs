//! Error types for evictkit.
//!
//! Construction is the only place a cache can fail: `put` and `get` are
//! total, with `None` standing in for "not found" and absent arguments
//! turning `put` into a no-op.
//!
//! - [`ConfigError`]: invalid capacity or policy, from code or from the
//!   environment. [`ConfigError::kind`] says which.
//! - [`InvariantError`]: returned by `check_invariants` when the store and
//!   the order tracker of a cache disagree.
//!
//! ```
//! use evictkit::error::ConfigErrorKind;
//! use evictkit::policy::lru::LruCache;
//!
//! let err = LruCache::<&str, i32>::try_new(0).unwrap_err();
//! assert_eq!(err.kind(), ConfigErrorKind::ZeroCapacity);
//! assert_eq!(err.to_string(), "capacity must be > 0");
//! ```

use std::fmt;

/// What was wrong with a cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// A capacity of zero, which cannot hold a single entry.
    ZeroCapacity,
    /// A capacity string that is not a positive integer.
    InvalidCapacity,
    /// A policy name outside `fifo`, `lifo`, `lru`, `mru`, `lfu`.
    UnknownPolicy,
}

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`PolicyCache::try_new`](crate::cache::PolicyCache::try_new),
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build) and
/// [`CacheConfig::from_env`](crate::config::CacheConfig::from_env).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new(ConfigErrorKind::ZeroCapacity, "capacity must be > 0")
    }

    pub(crate) fn invalid_capacity(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::InvalidCapacity, message)
    }

    pub(crate) fn unknown_policy(name: &str) -> Self {
        Self::new(
            ConfigErrorKind::UnknownPolicy,
            format!("unknown cache policy {name:?} (expected fifo, lifo, lru, mru or lfu)"),
        )
    }

    #[inline]
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Error returned when the store and order tracker of a cache disagree.
///
/// Produced by
/// [`PolicyCache::check_invariants`](crate::cache::PolicyCache::check_invariants).
/// Seeing one means a bug in a tracker, most likely a custom
/// [`OrderTracker`](crate::policy::OrderTracker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}
