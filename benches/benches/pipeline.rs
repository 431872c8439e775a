//! Attractor Pipeline Criterion Benchmark
//!
//! End-to-end cost per digest width, with the wall-clock floor disabled so
//! the numbers reflect computation only.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use attractor::kernels::constants::master_salt_len;
use attractor::{DigestWidth, HardenedLorenzHasher, HierarchicalSalt};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::hint::black_box;
use std::time::Duration;

fn fast(width: DigestWidth) -> HardenedLorenzHasher {
    HardenedLorenzHasher::for_width(width)
        .unwrap()
        .with_min_compute_time(Duration::ZERO)
}

/// Salt under which every preset stays bounded for `INPUT`.
fn pinned_salt(hasher: &HardenedLorenzHasher) -> HierarchicalSalt {
    let width = hasher.digest_width();
    let master = vec![1; master_salt_len(width.bits())];
    HierarchicalSalt::derive(master, hasher.stages().len(), width, 0).unwrap()
}

const INPUT: &[u8] = b"benchmark input";

// =============================================================================
// BENCHMARK 1: HARDENED HASH
// =============================================================================

/// Full pipeline under a fixed salt: all stages, finalization.
///
/// Fresh salts make wide presets diverge now and then, so the salt is pinned.
fn bench_hardened(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Hardened");
    group.sample_size(20);

    for width in DigestWidth::ALL {
        let hasher = fast(width);
        let salt = pinned_salt(&hasher);
        group.bench_function(width.algorithm_name(), |b| {
            b.iter(|| {
                hasher
                    .compute_with_salt(black_box(INPUT), salt.clone())
                    .unwrap()
            })
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: VERIFICATION
// =============================================================================

/// Recomputation under a stored salt hierarchy.
fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Verify");
    group.sample_size(20);

    for width in DigestWidth::ALL {
        let hasher = fast(width);
        let stored = hasher.compute_with_salt(INPUT, pinned_salt(&hasher)).unwrap();
        group.bench_function(width.algorithm_name(), |b| {
            b.iter(|| hasher.verify(black_box(INPUT), &stored).unwrap())
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: INPUT SIZE
// =============================================================================

/// Input length only affects the first seed digest and adaptive parameters.
fn bench_input_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Input-Size");
    group.sample_size(20);
    let hasher = fast(DigestWidth::W256);

    for (size, name) in [(16, "16B"), (1024, "1KB"), (1024 * 1024, "1MB")] {
        let mut input = vec![0u8; size];
        rand::rng().fill(&mut input[..]);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| hasher.compute_simple(black_box(data)).unwrap())
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: BATCH
// =============================================================================

/// Independent inputs hashed through `compute_batch`.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Batch");
    group.sample_size(10);
    let hasher = fast(DigestWidth::W256);

    let owned: Vec<Vec<u8>> = (0u8..16).map(|i| vec![i; 32]).collect();
    let inputs: Vec<&[u8]> = owned.iter().map(Vec::as_slice).collect();

    group.bench_function("16x256", |b| {
        b.iter(|| hasher.compute_batch(black_box(&inputs)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_hardened,
    bench_verify,
    bench_input_size,
    bench_batch
);
criterion_main!(benches);
