//! Kamus Benchmarks
//!
//! Benchmarks for the dictionary trie and its CSV codec, implemented with
//! the Criterion framework for statistical analysis and regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use kamus_lib::data_structures::kamus_trie::KamusTrie;
use std::time::Duration;

/// Builds a trie with `count` words sharing the prefixes `prefix_<i>_`.
fn populated(count: usize) -> (KamusTrie, Vec<String>) {
    let keys: Vec<String> = (0..count)
        .map(|i| format!("prefix_{}_key_{}", i / 10, i % 10))
        .collect();
    let trie = keys
        .iter()
        .enumerate()
        .map(|(i, key)| (key.as_str(), format!("meaning_{i}")))
        .collect();
    (trie, keys)
}

/// Benchmark the Kamus Trie
fn bench_kamus_trie(c: &mut Criterion) {
    let mut group = c.benchmark_group("kamus_trie");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    // Insert benchmark with different key sizes
    for key_length in [8, 16, 32, 64].iter() {
        group.bench_with_input(
            BenchmarkId::new("insert", key_length),
            key_length,
            |b, &length| {
                let mut trie = KamusTrie::new();
                let keys: Vec<String> = (0..1000)
                    .map(|i| format!("{:0width$}", i, width = length))
                    .collect();

                let mut index = 0;
                b.iter(|| {
                    let key = &keys[index % keys.len()];
                    index += 1;
                    black_box(trie.insert(key, "meaning"));
                });
            },
        );
    }

    group.bench_function("search", |b| {
        let (trie, keys) = populated(1000);
        let mut index = 0;
        b.iter(|| {
            let key = &keys[index % keys.len()];
            index += 1;
            black_box(trie.search(key));
        });
    });

    group.bench_function("starts_with", |b| {
        let (trie, _) = populated(1000);
        let mut index = 0;
        b.iter(|| {
            let prefix = format!("prefix_{}_", index % 100);
            index += 1;
            black_box(trie.starts_with(&prefix));
        });
    });

    group.bench_function("delete_and_reinsert", |b| {
        let (mut trie, keys) = populated(1000);
        let mut index = 0;
        b.iter(|| {
            let key = &keys[index % keys.len()];
            index += 1;
            let meaning = trie.delete(key);
            black_box(&meaning);
            trie.insert(key, meaning.unwrap_or_default());
        });
    });

    for size in [100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("display_all_words", size),
            size,
            |b, &size| {
                let (trie, _) = populated(size);
                b.iter(|| black_box(trie.display_all_words().count()));
            },
        );
    }

    group.finish();
}

/// Benchmark saving and loading the dictionary file format
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("kamus_codec");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));

    for size in [100, 1000, 10_000].iter() {
        let (trie, _) = populated(*size);
        let mut encoded = Vec::new();
        trie.save_to_writer(&mut encoded).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("save", size), &trie, |b, trie| {
            b.iter(|| {
                let mut out = Vec::with_capacity(encoded.len());
                black_box(trie.save_to_writer(&mut out).unwrap());
            });
        });
        group.bench_with_input(BenchmarkId::new("load", size), &encoded, |b, encoded| {
            b.iter(|| {
                let mut loaded = KamusTrie::new();
                black_box(loaded.load_from_reader(encoded.as_slice()).unwrap());
            });
        });
    }

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_kamus_trie, bench_codec
}

criterion_main!(benches);
