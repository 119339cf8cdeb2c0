#![cfg(feature = "concurrency")]

// ==============================================
// CONCURRENT LRU CACHE TESTS (integration)
// ==============================================
//
// Multi-threaded workloads over `ConcurrentLruCache`, hammering the single
// shared structure from many threads at once. Every mutation runs under the
// write lock, so the capacity bound and the exactly-once eviction
// notification must hold no matter how the threads interleave.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use lrukit::error::NotFoundError;
use lrukit::policy::lru::ConcurrentLruCache;

mod shared_access {
    use super::*;

    #[test]
    fn mixed_workload_respects_capacity() {
        let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::try_new(64).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for t in 0..8u64 {
            let cache = cache.clone();
            let hits = Arc::clone(&hits);
            handles.push(thread::spawn(move || {
                for i in 0..500u64 {
                    let key = (t * 31 + i) % 128;
                    match i % 4 {
                        0 => {
                            cache.insert(key, key * 2);
                        }
                        1 => {
                            if let Some(v) = cache.try_get(&key) {
                                assert_eq!(*v, key * 2);
                                hits.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                        2 => {
                            cache.contains(&key);
                        }
                        _ => {
                            cache.touch(&key);
                        }
                    }
                    assert!(cache.len() <= cache.capacity());
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 64);
        assert!(hits.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn clones_share_one_cache() {
        let cache: ConcurrentLruCache<&'static str, i32> =
            ConcurrentLruCache::try_new(8).unwrap();
        let clone = cache.clone();

        let writer = thread::spawn(move || {
            for i in 0..8 {
                clone.insert("key", i);
            }
        });
        writer.join().unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"key").map(|v| *v), Ok(7));
    }

    #[test]
    fn get_reports_missing_key() {
        let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::try_new(2).unwrap();
        cache.insert(1, 10);

        assert_eq!(cache.get(&2), Err(NotFoundError::new()));
        assert!(cache.try_get(&2).is_none());
    }
}

mod notification {
    use super::*;

    #[test]
    fn evictions_counted_exactly_once_across_threads() {
        // Distinct keys per thread, never re-inserted: every key either
        // survives in the cache or was reported evicted exactly once.
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 200;

        let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::try_new(32).unwrap();
        let evictions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evictions);
        cache.set_eviction_listener(lrukit::listener::FnListener(
            move |_k: &u64, _v: Arc<u64>| {
                counter.fetch_add(1, Ordering::Relaxed);
            },
        ));

        let mut handles = Vec::new();
        for t in 0..THREADS {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let key = t * PER_THREAD + i;
                    cache.insert(key, key);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let inserted = (THREADS * PER_THREAD) as usize;
        assert_eq!(evictions.load(Ordering::Relaxed), inserted - cache.len());
        assert_eq!(cache.len(), 32);
    }

    #[test]
    fn notified_keys_are_gone() {
        let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::try_new(4).unwrap();
        let evicted: Arc<std::sync::Mutex<Vec<u32>>> =
            Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        cache.set_eviction_listener(lrukit::listener::FnListener(
            move |k: &u32, _v: Arc<u32>| {
                sink.lock().unwrap().push(*k);
            },
        ));

        let mut handles = Vec::new();
        for t in 0..4u32 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                // Disjoint key ranges, each key inserted once.
                for i in 0..100 {
                    cache.insert(t * 100 + i, i);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        for key in evicted.lock().unwrap().iter() {
            assert!(!cache.contains(key), "evicted key {key} still present");
        }
    }
}
