//! FrequencyIndex operation benchmarks.
//!
//! Run with: `cargo bench --bench frequency_index`
//!
//! Keys are inserted in shuffled order; the tree is unbalanced, so sorted
//! input would measure the degenerate linked-list shape instead.

use std::hint::black_box;
use std::time::Instant;

use countkit::index::FrequencyIndex;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const SIZES: [usize; 3] = [1_024, 16_384, 131_072];
const OPS: u64 = 10_000;

fn shuffled_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n as u64).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(seed));
    keys
}

fn populated(keys: &[u64]) -> FrequencyIndex<u64, u64> {
    let mut index = FrequencyIndex::new(keys.len().max(10));
    for &key in keys {
        index.insert(key, key, 1 + key % 4).unwrap();
    }
    index
}

// ============================================================================
// Insert
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_insert");
    for size in SIZES {
        let keys = shuffled_keys(size, 7);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| {
                let mut index = FrequencyIndex::new(10);
                for &key in keys {
                    index.insert(key, key, 1).unwrap();
                }
                black_box(index.size())
            })
        });
    }
    group.finish();
}

// ============================================================================
// Count and Payload Lookup (table path)
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_lookup");
    group.throughput(Throughput::Elements(OPS));
    for size in SIZES {
        let keys = shuffled_keys(size, 11);
        let index = populated(&keys);
        group.bench_function(BenchmarkId::new("count", size), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        black_box(index.lookup(&(i % size as u64)));
                    }
                }
                start.elapsed()
            })
        });
        group.bench_function(BenchmarkId::new("data", size), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        black_box(index.get_data(&(i % size as u64)));
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Remove / Reinsert Churn
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_churn");
    group.throughput(Throughput::Elements(OPS));
    for size in SIZES {
        let keys = shuffled_keys(size, 13);
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter_custom(|iters| {
                let mut index = populated(&keys);
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS as usize {
                        let key = keys[i % size];
                        index.remove_all(&key);
                        index.insert(key, key, 2).unwrap();
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Ordered Queries
// ============================================================================

fn bench_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_ordered");
    for size in SIZES {
        let keys = shuffled_keys(size, 17);
        let index = populated(&keys);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::new("all_keys", size), |b| {
            b.iter(|| black_box(index.get_all_keys(true).len()))
        });
        group.bench_function(BenchmarkId::new("unique_range", size), |b| {
            let upper = size as u64 / 2;
            b.iter(|| black_box(index.get_unique_keys_in_range(&0, &upper).len()))
        });
        group.bench_function(BenchmarkId::new("min_max", size), |b| {
            b.iter(|| black_box((index.get_min_key(), index.get_max_key())))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup,
    bench_churn,
    bench_ordered
);
criterion_main!(benches);
