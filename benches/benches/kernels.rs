//! Attractor Kernel Criterion Benchmark
//!
//! Isolated cost of the soft-float integrator and finalization rounds.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use attractor::kernels::float128::Float128;
use attractor::kernels::mixing::finalize;
use attractor::kernels::trajectory::{trajectory_block, LorenzParams};
use attractor::{DigestWidth, HierarchicalSalt};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

// =============================================================================
// BENCHMARK 1: SOFT FLOAT
// =============================================================================

fn bench_float128(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Float128");
    let a = Float128::from_f64(8.0 / 3.0);
    let b = Float128::from_f64(-45.6);

    group.bench_function("add", |bench| bench.iter(|| black_box(a) + black_box(b)));
    group.bench_function("mul", |bench| bench.iter(|| black_box(a) * black_box(b)));
    group.finish();
}

// =============================================================================
// BENCHMARK 2: TRAJECTORY
// =============================================================================

/// One stage block per output size.
fn bench_trajectory(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Trajectory");
    group.sample_size(20);

    let params = LorenzParams::from_f64(10.0, 28.0, 8.0 / 3.0, 0.01);
    let seeds = [
        Float128::from_f64(1.5),
        Float128::from_f64(-3.25),
        Float128::from_f64(12.0),
    ];

    for width in DigestWidth::ALL {
        group.throughput(Throughput::Elements(2000));
        group.bench_with_input(
            BenchmarkId::from_parameter(width.bits()),
            &width,
            |b, w| {
                b.iter(|| {
                    trajectory_block(black_box(seeds), &params, 2000, w.discard_steps(), w.bytes())
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: FINALIZATION
// =============================================================================

fn bench_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Finalize");

    for width in DigestWidth::ALL {
        let salt = HierarchicalSalt::derive(vec![7; 32], 2, width, 0).unwrap();
        let block = vec![0x3C; width.bytes()];
        group.bench_with_input(
            BenchmarkId::from_parameter(width.bits()),
            &block,
            |b, data| b.iter(|| finalize(black_box(data), &salt, width).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_float128, bench_trajectory, bench_finalize);
criterion_main!(benches);
