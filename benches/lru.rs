use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lrukit::listener::FnListener;
use lrukit::policy::lru::{ConcurrentLruCache, LruCore};
use lrukit::traits::{CoreCache, LruCacheTrait};
use std::sync::Arc;

fn bench_lru_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCore::try_new(1024).unwrap();
                for i in 0..1024u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), Arc::new(i));
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCore::try_new(1024).unwrap();
                for i in 0..1024u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_notified_churn(c: &mut Criterion) {
    c.bench_function("lru_notified_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCore::try_new(1024).unwrap();
                cache.set_eviction_listener(Box::new(FnListener(|k: &u64, _v: Arc<u64>| {
                    std::hint::black_box(*k);
                })));
                for i in 0..1024u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_touch_hotset(c: &mut Criterion) {
    c.bench_function("lru_touch_hotset", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCore::try_new(4096).unwrap();
                for i in 0..4096u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.touch(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_concurrent_try_get(c: &mut Criterion) {
    c.bench_function("concurrent_try_get", |b| {
        b.iter_batched(
            || {
                let cache = ConcurrentLruCache::try_new(1024).unwrap();
                for i in 0..1024u64 {
                    cache.insert(i, i);
                }
                cache
            },
            |cache| {
                for i in 0..1024u64 {
                    let _ = std::hint::black_box(cache.try_get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_lru_eviction_churn,
    bench_lru_notified_churn,
    bench_lru_touch_hotset,
    bench_concurrent_try_get
);
criterion_main!(benches);
