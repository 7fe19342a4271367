//! Benchmarks for the pivot and signal pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trendbreaker_core::traits::SeriesIndicator;
use trendbreaker_core::types::{Bar, BarSeries, Timeframe};
use trendbreaker_indicators::{PivotDetector, PivotLine};

fn generate_series(size: usize) -> BarSeries {
    let mut series = BarSeries::new("BENCH".to_string(), Timeframe::Hour1);
    for i in 0..size {
        let mid = 100.0 + (i as f64 * 0.1).sin() * 10.0;
        series
            .push(Bar::new(
                i as i64 * 3_600_000,
                mid,
                mid + 2.0,
                mid - 2.0,
                mid + (i as f64 * 0.3).cos(),
                1000.0,
            ))
            .unwrap();
    }
    series
}

fn benchmark_pivot_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("PivotDetector");

    for size in [1000, 10000, 100000].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("detect", size), &series, |b, series| {
            let detector = PivotDetector::new(12);
            b.iter(|| detector.calculate(black_box(series)))
        });
    }

    group.finish();
}

fn benchmark_pivot_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("PivotLine");

    for size in [1000, 10000].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("batch", size), &series, |b, series| {
            let line = PivotLine::new(12, 30);
            b.iter(|| line.calculate(black_box(series)))
        });

        group.bench_with_input(BenchmarkId::new("streaming", size), &series, |b, series| {
            let line = PivotLine::new(12, 30);
            b.iter(|| line.signal_at(black_box(series), series.len() - 1))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pivot_detector, benchmark_pivot_line);
criterion_main!(benches);
