//! Discard notifications.
//!
//! Every eviction hands the evicted key and value to the cache's
//! [`DiscardListener`], exactly once per evicted entry. Overwrites, misses,
//! ignored `put`s and [`clear`](crate::traits::CoreCache::clear) never notify.
//!
//! | Listener                 | Effect                                           |
//! |--------------------------|--------------------------------------------------|
//! | [`LogListener`]          | `DISCARD: <key>` as a `tracing` INFO event       |
//! | [`StdoutListener`]       | prints `DISCARD: <key>` to stdout                |
//! | [`RecordingListener`]    | remembers evicted keys in order                  |
//! | [`NoopListener`]         | nothing                                          |
//! | `FnMut(K, V)` closures   | whatever the closure does                        |
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut evicted = Vec::new();
//! {
//!     let mut cache = FifoCache::with_listener(1, |key: String, _value: i32| {
//!         evicted.push(key);
//!     })
//!     .unwrap();
//!     cache.insert("a".to_string(), 1);
//!     cache.insert("b".to_string(), 2);
//! }
//! assert_eq!(evicted, vec!["a".to_string()]);
//! ```

use std::fmt;

/// Target used by [`LogListener`] events.
pub const DISCARD_TARGET: &str = "evictkit::discard";

/// Receives entries evicted to make room for a new key.
pub trait DiscardListener<K, V> {
    fn on_discard(&mut self, key: K, value: V);
}

impl<K, V, F> DiscardListener<K, V> for F
where
    F: FnMut(K, V),
{
    #[inline]
    fn on_discard(&mut self, key: K, value: V) {
        self(key, value)
    }
}

/// Emits `DISCARD: <key>` as an INFO event on [`DISCARD_TARGET`]. The
/// default listener.
///
/// The key is written with its `Display` form, the same line
/// [`StdoutListener`] prints. Caches over keys without `Display` take another
/// listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogListener;

impl<K: fmt::Display, V> DiscardListener<K, V> for LogListener {
    fn on_discard(&mut self, key: K, _value: V) {
        tracing::info!(target: DISCARD_TARGET, "{}", discard_line(&key));
    }
}

/// Prints `DISCARD: <key>` to standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdoutListener;

impl<K: fmt::Display, V> DiscardListener<K, V> for StdoutListener {
    fn on_discard(&mut self, key: K, _value: V) {
        println!("{}", discard_line(&key));
    }
}

/// Ignores every eviction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopListener;

impl<K, V> DiscardListener<K, V> for NoopListener {
    #[inline]
    fn on_discard(&mut self, _key: K, _value: V) {}
}

/// Keeps every evicted key, oldest eviction first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingListener<K> {
    keys: Vec<K>,
}

impl<K> RecordingListener<K> {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Returns the recorded keys and starts over.
    pub fn take(&mut self) -> Vec<K> {
        std::mem::take(&mut self.keys)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K> Default for RecordingListener<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> DiscardListener<K, V> for RecordingListener<K> {
    fn on_discard(&mut self, key: K, _value: V) {
        self.keys.push(key);
    }
}

/// Formats the console line announcing an eviction.
pub fn discard_line<K: fmt::Display + ?Sized>(key: &K) -> String {
    format!("DISCARD: {key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_line_format() {
        assert_eq!(discard_line("A"), "DISCARD: A");
        assert_eq!(discard_line(&42), "DISCARD: 42");
    }

    #[test]
    fn recording_listener_keeps_order() {
        let mut listener = RecordingListener::new();
        listener.on_discard("a", 1);
        listener.on_discard("b", 2);
        assert_eq!(listener.keys(), &["a", "b"]);
        assert_eq!(listener.len(), 2);

        assert_eq!(listener.take(), vec!["a", "b"]);
        assert!(listener.is_empty());
    }

    #[test]
    fn closures_are_listeners() {
        let mut seen = Vec::new();
        let mut listener = |key: u32, value: char| seen.push((key, value));
        listener.on_discard(1, 'a');
        listener.on_discard(2, 'b');
        assert_eq!(seen, vec![(1, 'a'), (2, 'b')]);
    }

    #[test]
    fn noop_listener_accepts_any_key() {
        let mut noop = NoopListener;
        DiscardListener::<Vec<u8>, ()>::on_discard(&mut noop, vec![1], ());
    }

    // ==============================================
    // LogListener output
    // ==============================================

    mod log_output {
        use std::io;
        use std::sync::{Arc, Mutex};

        use super::*;
        use crate::policy::fifo::FifoCache;
        use crate::traits::CoreCache;

        #[derive(Clone, Default)]
        struct SharedBuf(Arc<Mutex<Vec<u8>>>);

        impl io::Write for SharedBuf {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        fn captured<F: FnOnce()>(f: F) -> Vec<String> {
            let buf = SharedBuf::default();
            let writer = buf.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .without_time()
                .with_max_level(tracing::Level::INFO)
                .finish();
            tracing::subscriber::with_default(subscriber, f);
            let bytes = buf.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        }

        fn discard_lines(lines: &[String]) -> Vec<&str> {
            lines
                .iter()
                .filter_map(|line| line.find("DISCARD:").map(|at| &line[at..]))
                .collect()
        }

        #[test]
        fn str_keys_are_logged_without_quotes() {
            let lines = captured(|| {
                let mut cache = FifoCache::<&str, i32>::new(1);
                cache.put(Some("A"), Some(1));
                cache.put(Some("B"), Some(2));
            });
            assert_eq!(discard_lines(&lines), vec!["DISCARD: A"]);
            let line = lines.iter().find(|l| l.contains("DISCARD:")).unwrap();
            assert!(line.contains(DISCARD_TARGET), "{line}");
        }

        #[test]
        fn string_keys_use_display() {
            let lines = captured(|| {
                let mut log = LogListener;
                log.on_discard("X".to_string(), ());
            });
            assert_eq!(discard_lines(&lines), vec!["DISCARD: X"]);
        }

        #[test]
        fn one_line_per_eviction_none_for_overwrite_or_clear() {
            let lines = captured(|| {
                let mut cache = FifoCache::<&str, i32>::new(2);
                cache.put(Some("A"), Some(1));
                cache.put(Some("B"), Some(2));
                cache.put(Some("A"), Some(10));
                cache.put(Some("C"), Some(3));
                cache.put(Some("D"), Some(4));
                cache.clear();
                cache.put(Some("E"), Some(5));
            });
            assert_eq!(discard_lines(&lines), vec!["DISCARD: A", "DISCARD: B"]);
        }
    }
}
