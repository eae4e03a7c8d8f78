//! Capacity policy and cache configuration.
//!
//! Every cache is bounded by a capacity fixed at construction. The default is
//! [`DEFAULT_CAPACITY`] slots. [`CacheConfig`] bundles a capacity with the
//! eviction policy to use and can be loaded from the environment:
//!
//! | Variable            | Meaning                          | Default |
//! |---------------------|----------------------------------|---------|
//! | `EVICTKIT_CAPACITY` | maximum number of entries (> 0)  | `4`     |
//! | `EVICTKIT_POLICY`   | `fifo`, `lifo`, `lru`, `mru`, `lfu` | `lru` |
//!
//! Unset variables fall back to the default; set but malformed variables are a
//! [`ConfigError`].
//!
//! ```
//! use evictkit::builder::CachePolicy;
//! use evictkit::config::{CacheConfig, DEFAULT_CAPACITY};
//!
//! let config = CacheConfig::default();
//! assert_eq!(config.capacity, DEFAULT_CAPACITY);
//! assert_eq!(config.policy, CachePolicy::Lru);
//! assert!(config.validate().is_ok());
//! ```

use std::env;

use crate::builder::CachePolicy;
use crate::error::ConfigError;

/// Number of slots a cache gets when no capacity is specified.
pub const DEFAULT_CAPACITY: usize = 4;

/// Environment variable holding the capacity.
pub const CAPACITY_ENV: &str = "EVICTKIT_CAPACITY";

/// Environment variable holding the policy name.
pub const POLICY_ENV: &str = "EVICTKIT_POLICY";

/// Capacity and policy for a cache instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries. Must be greater than zero.
    pub capacity: usize,
    /// Eviction policy used by [`CacheBuilder::build_from_config`](crate::builder::CacheBuilder::build_from_config).
    pub policy: CachePolicy,
}

impl CacheConfig {
    /// Creates a config with the given capacity and policy, validating it.
    pub fn new(capacity: usize, policy: CachePolicy) -> Result<Self, ConfigError> {
        let config = Self { capacity, policy };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the capacity can hold at least one entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_capacity(self.capacity)
    }

    /// Loads the config from `EVICTKIT_CAPACITY` and `EVICTKIT_POLICY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the config through an arbitrary variable lookup.
    ///
    /// ```
    /// use evictkit::builder::CachePolicy;
    /// use evictkit::config::CacheConfig;
    ///
    /// let config = CacheConfig::from_lookup(|name| match name {
    ///     "EVICTKIT_CAPACITY" => Some("16".to_string()),
    ///     "EVICTKIT_POLICY" => Some("LFU".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.capacity, 16);
    /// assert_eq!(config.policy, CachePolicy::Lfu);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = match lookup(CAPACITY_ENV) {
            Some(raw) => parse_capacity(&raw)?,
            None => DEFAULT_CAPACITY,
        };
        let policy = match lookup(POLICY_ENV) {
            Some(raw) => raw.parse()?,
            None => CachePolicy::default(),
        };
        Self::new(capacity, policy)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: CachePolicy::default(),
        }
    }
}

/// Rejects capacities that cannot hold a single entry.
#[inline]
pub(crate) fn validate_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::zero_capacity());
    }
    Ok(())
}

fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    let trimmed = raw.trim();
    // Parse signed first so "-3" reports a sign problem, not a syntax one.
    let value: i64 = trimmed.parse().map_err(|_| {
        ConfigError::invalid_capacity(format!("{CAPACITY_ENV}: `{trimmed}` is not an integer"))
    })?;
    if value <= 0 {
        return Err(ConfigError::invalid_capacity(format!(
            "{CAPACITY_ENV}: capacity must be > 0, got {value}"
        )));
    }
    usize::try_from(value).map_err(|_| {
        ConfigError::invalid_capacity(format!("{CAPACITY_ENV}: {value} does not fit in usize"))
    })
}
