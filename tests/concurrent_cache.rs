// ==============================================
// CONCURRENT CACHE TESTS (integration)
// ==============================================
//
// ConcurrentCache under real thread contention. These require multi-threaded
// execution and cannot live inline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::concurrent::ConcurrentCache;
use evictkit::listener::RecordingListener;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lru::LruCache;
use evictkit::traits::{CoreCache, EvictingCache};

const THREADS: usize = 8;
const OPS_PER_THREAD: u64 = 2_000;

// ==============================================
// Capacity Bound Under Contention
// ==============================================

mod capacity_bound {
    use super::*;

    #[test]
    fn len_stays_bounded_for_every_policy() {
        for policy in CachePolicy::ALL {
            let cache = ConcurrentCache::new(
                CacheBuilder::new(32)
                    .listener(RecordingListener::new())
                    .build::<u64, u64>(policy),
            );
            let barrier = Arc::new(Barrier::new(THREADS));

            let handles: Vec<_> = (0..THREADS as u64)
                .map(|t| {
                    let cache = cache.clone();
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        for i in 0..OPS_PER_THREAD {
                            let key = (t * 7 + i) % 128;
                            if i % 3 == 0 {
                                let _ = cache.get(&key);
                            } else {
                                cache.put(Some(key), Some(i));
                            }
                            assert!(cache.len() <= 32);
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            cache.with(|inner| {
                assert_eq!(inner.capacity(), 32, "{policy}");
                inner.check_invariants().unwrap();
                for key in inner.listener().keys() {
                    assert!(*key < 128);
                }
            });
        }
    }
}

// ==============================================
// Notification Accounting
// ==============================================
//
// Every distinct key inserted beyond capacity produces exactly one discard,
// no matter how the inserts interleave.

mod notification_accounting {
    use super::*;

    #[test]
    fn one_discard_per_overflowing_insert() {
        let discards = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&discards);
        let listener = move |_key: u64, _value: u64| {
            counter.fetch_add(1, Ordering::Relaxed);
        };
        let cache = ConcurrentCache::new(LruCache::with_listener(100, listener).unwrap());
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS as u64)
            .map(|t| {
                let cache = cache.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..OPS_PER_THREAD {
                        cache.insert(t * OPS_PER_THREAD + i, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let total = THREADS * OPS_PER_THREAD as usize;
        assert_eq!(cache.len(), 100);
        assert_eq!(discards.load(Ordering::Relaxed), total - 100);
    }

    #[test]
    fn overwrites_from_many_threads_never_discard() {
        let cache = ConcurrentCache::new(
            LfuCache::with_listener(THREADS, RecordingListener::<u64>::new()).unwrap(),
        );
        for t in 0..THREADS as u64 {
            cache.insert(t, 0);
        }

        let handles: Vec<_> = (0..THREADS as u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..OPS_PER_THREAD {
                        cache.insert(t, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), THREADS);
        cache.with(|inner| assert!(inner.listener().is_empty()));
        for t in 0..THREADS as u64 {
            assert_eq!(cache.peek(&t), Some(OPS_PER_THREAD - 1));
        }
    }
}

// ==============================================
// Atomic Compound Operations
// ==============================================

mod compound {
    use super::*;

    #[test]
    fn with_makes_read_modify_write_atomic() {
        let cache = ConcurrentCache::new(LruCache::<&str, u64>::new(4));
        cache.insert("hits", 0);

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        cache.with(|inner| {
                            let next = inner.get(&"hits").copied().unwrap_or(0) + 1;
                            inner.insert("hits", next);
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.get(&"hits"), Some(THREADS as u64 * 500));
        assert_eq!(cache.with(|inner| inner.peek_victim().copied()), Some("hits"));
    }
}
