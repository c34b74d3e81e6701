// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

// Benchmark suite for the skip list maps.
//
// Each group compares the skip list variants against std's BTreeMap on the
// same seeded key stream:
// - SkipMap: unique keys, no spans
// - IndexedSkipMap: unique keys with span bookkeeping
// - MultiSkipMap: duplicate keys
// - BTreeMap: baseline

use std::collections::BTreeMap;

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};

use harness::Workload;
use skipmap::{Config, IndexedSkipMap, MultiSkipMap, SkipMap};

const SIZES: [u32; 3] = [1_000, 10_000, 100_000];

fn config() -> Config {
    return Config::default().with_max_level(20).with_seed(0x5eed);
}

fn skip_map(keys: &[u32]) -> SkipMap<u32, u32> {
    let mut map = SkipMap::with_config(&config()).expect("valid config");
    for key in keys {
        map.insert(*key, *key);
    }
    return map;
}

fn indexed_map(keys: &[u32]) -> IndexedSkipMap<u32, u32> {
    let mut map = IndexedSkipMap::with_config(&config()).expect("valid config");
    for key in keys {
        map.insert(*key, *key);
    }
    return map;
}

// =============================================================================
// Insertion
// =============================================================================

fn bench_sequential_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_insert");

    for size in SIZES {
        let keys: Vec<u32> = (0..size).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("SkipMap", size), &keys, |b, keys| {
            b.iter(|| black_box(skip_map(keys).len()));
        });

        group.bench_with_input(BenchmarkId::new("IndexedSkipMap", size), &keys, |b, keys| {
            b.iter(|| black_box(indexed_map(keys).len()));
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                let map: BTreeMap<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
                black_box(map.len())
            });
        });
    }

    group.finish();
}

fn bench_random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_insert");

    for size in SIZES {
        let keys = Workload::new(1, size).shuffled_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("SkipMap", size), &keys, |b, keys| {
            b.iter(|| black_box(skip_map(keys).len()));
        });

        group.bench_with_input(BenchmarkId::new("IndexedSkipMap", size), &keys, |b, keys| {
            b.iter(|| black_box(indexed_map(keys).len()));
        });

        group.bench_with_input(BenchmarkId::new("MultiSkipMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = MultiSkipMap::with_config(&config()).expect("valid config");
                for key in keys {
                    // Two occurrences per key.
                    map.insert(*key / 2, *key);
                }
                black_box(map.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                let map: BTreeMap<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
                black_box(map.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Lookup
// =============================================================================

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for size in SIZES {
        let keys = Workload::new(2, size).shuffled_keys(size);
        let queries = Workload::new(3, size * 2).distinct_keys(1_000.min(size as usize));
        group.throughput(Throughput::Elements(queries.len() as u64));

        let map = skip_map(&keys);
        group.bench_function(BenchmarkId::new("SkipMap", size), |b| {
            b.iter(|| queries.iter().filter(|k| map.find(*k).is_some()).count());
        });

        let btree: BTreeMap<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
        group.bench_function(BenchmarkId::new("BTreeMap", size), |b| {
            b.iter(|| queries.iter().filter(|k| btree.get(*k).is_some()).count());
        });
    }

    group.finish();
}

fn bench_rank_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_queries");

    for size in SIZES {
        let keys = Workload::new(4, size).shuffled_keys(size);
        let map = indexed_map(&keys);
        let ranks = Workload::new(5, size).distinct_keys(1_000.min(size as usize));
        group.throughput(Throughput::Elements(ranks.len() as u64));

        group.bench_function(BenchmarkId::new("at", size), |b| {
            b.iter(|| {
                ranks
                    .iter()
                    .filter_map(|r| map.at(*r as usize))
                    .map(|(k, _)| *k as u64)
                    .sum::<u64>()
            });
        });

        group.bench_function(BenchmarkId::new("rank_of", size), |b| {
            b.iter(|| ranks.iter().filter_map(|k| map.rank_of(k)).sum::<usize>());
        });

        // Baseline: what rank queries cost without spans.
        let btree: BTreeMap<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
        group.bench_function(BenchmarkId::new("BTreeMap::nth", size), |b| {
            b.iter(|| {
                ranks
                    .iter()
                    .take(10)
                    .filter_map(|r| btree.iter().nth(*r as usize))
                    .map(|(k, _)| *k as u64)
                    .sum::<u64>()
            });
        });
    }

    group.finish();
}

// =============================================================================
// Removal
// =============================================================================

fn bench_erase_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_all");

    for size in SIZES {
        let keys = Workload::new(6, size).shuffled_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("SkipMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = skip_map(keys);
                for key in keys {
                    map.erase(key);
                }
                black_box(map.is_empty())
            });
        });

        group.bench_with_input(BenchmarkId::new("IndexedSkipMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = indexed_map(keys);
                for key in keys {
                    map.erase(key);
                }
                black_box(map.is_empty())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_insert,
    bench_random_insert,
    bench_find,
    bench_rank_queries,
    bench_erase_all,
);
criterion_main!(benches);
