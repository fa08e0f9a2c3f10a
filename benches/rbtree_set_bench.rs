//! Benchmark for RbTreeSet algebra vs standard BTreeSet.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use redblack::RbTreeSet;
use std::collections::BTreeSet;
use std::hint::black_box;

// =============================================================================
// Set Algebra Benchmarks
// =============================================================================

fn benchmark_algebra(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_algebra");

    for size in [1000, 10000] {
        let left: RbTreeSet<i32> = (0..size).step_by(2).collect();
        let right: RbTreeSet<i32> = (0..size).step_by(3).collect();
        let standard_left: BTreeSet<i32> = (0..size).step_by(2).collect();
        let standard_right: BTreeSet<i32> = (0..size).step_by(3).collect();

        group.bench_with_input(BenchmarkId::new("RbTreeSet/union", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.union(&right).count()));
        });
        group.bench_with_input(BenchmarkId::new("BTreeSet/union", size), &size, |bencher, _| {
            bencher.iter(|| black_box(standard_left.union(&standard_right).count()));
        });

        group.bench_with_input(
            BenchmarkId::new("RbTreeSet/intersection", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(left.intersection(&right).count()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("BTreeSet/intersection", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(standard_left.intersection(&standard_right).count()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("RbTreeSet/symmetric_difference", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(left.symmetric_difference(&right).count()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("BTreeSet/symmetric_difference", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    black_box(standard_left.symmetric_difference(&standard_right).count())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contains");

    for size in [1000, 10000] {
        let set: RbTreeSet<i32> = (0..size).step_by(2).collect();
        let standard_set: BTreeSet<i32> = (0..size).step_by(2).collect();

        group.bench_with_input(BenchmarkId::new("RbTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                (0..size)
                    .filter(|value| set.contains(&black_box(*value)))
                    .count()
            });
        });
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                (0..size)
                    .filter(|value| standard_set.contains(&black_box(*value)))
                    .count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_algebra, benchmark_contains);

criterion_main!(benches);
