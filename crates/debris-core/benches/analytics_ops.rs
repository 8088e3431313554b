//! Criterion benchmarks for the analytics engine.
//!
//! Sized like realistic dashboard refreshes: a year of daily risk values and
//! a few hundred altitude-band regions.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use debris_common::{FactorMetrics, RegionMap, RegionMetrics, Sensitivity};
use debris_config::AnalyticsConfig;
use debris_core::analytics::FixedClock;
use debris_core::AnalyticsEngine;

fn engine() -> AnalyticsEngine<FixedClock> {
    AnalyticsEngine::with_clock(
        AnalyticsConfig::default(),
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
    )
}

fn risk_series(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let base = 0.4 + (i as f64 * 0.21).sin() * 0.1;
            if i % 97 == 50 {
                base + 0.5
            } else {
                base
            }
        })
        .collect()
}

fn regions(count: usize) -> RegionMap {
    (0..count)
        .map(|i| {
            let low = 300 + i * 50;
            let metrics = RegionMetrics::new(
                500.0 + (i as f64 * 0.7).cos().abs() * 6000.0,
                (i as u64 * 7919) % 60_000,
                (i as f64 * 0.13).sin().abs(),
            );
            (format!("LEO-{low}-{}", low + 50), metrics)
        })
        .collect()
}

fn bench_series_ops(c: &mut Criterion) {
    let e = engine();
    let mut group = c.benchmark_group("series");

    for len in [30usize, 365, 4096] {
        let series = risk_series(len);

        group.bench_with_input(BenchmarkId::new("detect_anomalies", len), &series, |b, s| {
            b.iter(|| black_box(e.detect_anomalies(black_box(s), Sensitivity::Medium)));
        });

        group.bench_with_input(BenchmarkId::new("analyze_trend", len), &series, |b, s| {
            b.iter(|| black_box(e.analyze_trend(black_box(s))));
        });

        group.bench_with_input(BenchmarkId::new("forecast/30", len), &series, |b, s| {
            b.iter(|| black_box(e.forecast(black_box(s), 30, None)));
        });
    }

    group.finish();
}

fn bench_region_ops(c: &mut Criterion) {
    let e = engine();
    let mut group = c.benchmark_group("regions");

    for count in [10usize, 200] {
        let map = regions(count);
        let series = risk_series(365);

        group.bench_with_input(BenchmarkId::new("identify_hotspots", count), &map, |b, m| {
            b.iter(|| black_box(e.identify_hotspots(black_box(m), None)));
        });

        group.bench_with_input(BenchmarkId::new("summarize_dashboard", count), &map, |b, m| {
            b.iter(|| black_box(e.summarize_dashboard(black_box(m), &series, Sensitivity::High)));
        });
    }

    group.bench_function("explain_risk_factors", |b| {
        let metrics = FactorMetrics {
            growth_rate: 0.03,
            object_count: 25_000,
            clustering_index: 0.6,
            inclination_factor: Some(0.4),
        };
        b.iter(|| black_box(e.explain_risk_factors(black_box(&metrics))));
    });

    group.finish();
}

criterion_group!(benches, bench_series_ops, bench_region_ops);
criterion_main!(benches);
