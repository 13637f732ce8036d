//! Micro-operation benchmarks for the W-TinyLFU cache.
//!
//! Run with: `cargo bench --bench wtinylfu`
//!
//! Measures per-operation latency for get and insert under hit-heavy,
//! eviction-heavy and mixed conditions.

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lfukit::policy::wtinylfu::WTinyLfuCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 16_384;
const OPS: u64 = 100_000;

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("wtinylfu", |b| {
        b.iter_custom(|iters| {
            let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.insert(i, i);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % (CAPACITY as u64);
                    black_box(cache.get(&key));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

fn bench_insert_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("wtinylfu", |b| {
        b.iter_custom(|iters| {
            let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.insert(i, i);
            }
            let start = Instant::now();
            for iter in 0..iters {
                // Fresh keys every round: each insert runs the admission
                // contest against a full cache.
                let base = (iter + 1) * OPS;
                for i in 0..OPS {
                    cache.insert(base + i, i);
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("wtinylfu_90_10", |b| {
        b.iter_custom(|iters| {
            let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.insert(i, i);
            }
            let mut rng = StdRng::seed_from_u64(0xbeef);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    if rng.gen_range(0..10) == 0 {
                        cache.insert((CAPACITY as u64) + i, i);
                    } else {
                        let key = rng.gen_range(0..CAPACITY as u64 * 2);
                        black_box(cache.get(&key));
                    }
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_insert_evicting,
    bench_mixed_workload
);
criterion_main!(benches);
