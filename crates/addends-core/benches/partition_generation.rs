//! Partition generation benchmarks.
//!
//! Compares the memoized generator (cold and warm) against the buffered
//! enumeration for a range of part counts.

use addends_core::{cached::PossibleAddends, pooled::partitions_buffered};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const CASES: &[(u32, usize)] = &[(40, 3), (60, 4), (80, 5), (100, 6)];

fn bench_memoized_cold(c: &mut Criterion) {
    let mut group = c.benchmark_group("memoized_cold");

    for &(sum, count) in CASES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{sum}/{count}")),
            &(sum, count),
            |b, &(sum, count)| {
                b.iter(|| {
                    let addends = PossibleAddends::new();
                    black_box(addends.unique_addends_for(sum, count).unwrap().len())
                });
            },
        );
    }

    group.finish();
}

fn bench_memoized_warm(c: &mut Criterion) {
    let mut group = c.benchmark_group("memoized_warm");

    for &(sum, count) in CASES {
        let addends = PossibleAddends::new();
        addends.unique_addends_for(sum, count).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{sum}/{count}")),
            &(sum, count),
            |b, &(sum, count)| {
                b.iter(|| black_box(addends.unique_addends_for(sum, count).unwrap().len()));
            },
        );
    }

    group.finish();
}

fn bench_buffered(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffered");

    for &(sum, count) in CASES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{sum}/{count}")),
            &(sum, count),
            |b, &(sum, count)| {
                b.iter(|| {
                    let mut total = 0u64;
                    partitions_buffered(sum, count)
                        .unwrap()
                        .for_each_view(|view| total += view[count - 1] as u64);
                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_memoized_cold,
    bench_memoized_warm,
    bench_buffered
);
criterion_main!(benches);
