//! # Cache Metrics
//!
//! Lightweight counters recorded by [`PolicyCache`](crate::cache::PolicyCache)
//! when the `metrics` feature is enabled. Recording and reading are split:
//! the cache writes through [`CacheMetricsRecorder`], callers read a
//! [`CacheMetricsSnapshot`] through [`MetricsSnapshotProvider`].
//!
//! ```text
//!   PolicyCache ──record_*──► CacheMetrics ──snapshot──► CacheMetricsSnapshot
//!                                 (u64 counters)            (+ len, capacity)
//! ```
//!
//! Counters are plain `u64` fields: every recording call already runs under
//! `&mut self`, so no atomics are needed.

/// Counters common to every eviction policy.
pub trait CacheMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    /// A `put` dropped because its key or value was absent.
    fn record_put_ignored(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Read a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub puts_ignored: u64,
    pub evicted_entries: u64,
    pub clears: u64,
}

impl CacheMetricsRecorder for CacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_put_ignored(&mut self) {
        self.puts_ignored += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl CacheMetrics {
    /// Builds a snapshot, attaching the cache's current size.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            puts_ignored: self.puts_ignored,
            evicted_entries: self.evicted_entries,
            clears: self.clears,
            cache_len,
            capacity,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub puts_ignored: u64,

    pub evicted_entries: u64,
    pub clears: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before any `get`.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
