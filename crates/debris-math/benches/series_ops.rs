//! Criterion benchmarks for `debris-math`.
//!
//! Focus on the series kernels that run once per analytics call.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use debris_math::{moments, normalize_weights, window_before_tail};

fn bench_series_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");

    for len in [30usize, 365, 4096] {
        let series: Vec<f64> = (0..len).map(|i| 2000.0 + (i as f64 * 0.37).sin() * 150.0).collect();

        group.bench_with_input(BenchmarkId::new("moments", len), &series, |b, s| {
            b.iter(|| black_box(moments(black_box(s))));
        });

        group.bench_with_input(BenchmarkId::new("window_before_tail", len), &series, |b, s| {
            b.iter(|| black_box(window_before_tail(black_box(s), 7, 7).len()));
        });
    }

    group.bench_function("normalize_weights/5", |b| {
        let weights = [0.4, 0.9, 0.6, 0.05, 0.2];
        b.iter(|| black_box(normalize_weights(black_box(&weights))));
    });

    group.finish();
}

criterion_group!(benches, bench_series_kernels);
criterion_main!(benches);
