//! Criterion benchmarks for metric hot paths.
//!
//! Benchmarks:
//! 1. Full registry pass (aggregation plus all six metrics)
//! 2. Sharpe daily-return bucketing
//! 3. Stagnation scan, with and without out-of-sample clipping
//! 4. Stability (daily equity plus similarity)

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stratscore_core::stats::keys;
use stratscore_core::synthetic::generate_orders;
use stratscore_core::{
    AggregatedStats, DirectionalResolver, OosRange, OutOfSampleRanges, SampleSelector, TradeOrder,
};
use stratscore_metrics::metrics::sharpe::sharpe_ratio;
use stratscore_metrics::{
    composite_score, detect_stagnation, CompositeWeights, Metric, MetricInput, MetricRegistry,
    Stability,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 1, 5, 9, 30, 0).unwrap()
}

fn make_orders(n: usize) -> Vec<TradeOrder> {
    generate_orders(n, start(), 42)
}

/// One 30-day out-of-sample window every 120 days.
fn make_oos(n: usize) -> OutOfSampleRanges {
    let ranges = (0..(n as i64 / 120).max(1))
        .map(|i| {
            let from = start() + Duration::days(90 + i * 120);
            OosRange::new(from, from + Duration::days(30))
        })
        .collect();
    OutOfSampleRanges::new(ranges).unwrap()
}

// ── 1. Registry Pass ─────────────────────────────────────────────────

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    let registry = MetricRegistry::standard();
    let selector = SampleSelector::default();

    for &n in &[252, 1260, 5040] {
        let orders = make_orders(n);
        group.bench_with_input(BenchmarkId::new("compute_all", n), &n, |b, _| {
            b.iter(|| {
                let base = AggregatedStats::from_orders(
                    black_box(&orders),
                    &selector,
                    &DirectionalResolver,
                );
                let stats = registry.compute_all(&base, &orders, selector, None);
                composite_score(&stats, &CompositeWeights::default())
            });
        });
    }

    group.finish();
}

// ── 2. Sharpe ────────────────────────────────────────────────────────

fn bench_sharpe(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharpe");

    for &n in &[252, 1260, 5040] {
        let orders = make_orders(n);
        group.bench_with_input(BenchmarkId::new("daily_buckets", n), &n, |b, _| {
            b.iter(|| sharpe_ratio(black_box(&orders)));
        });
    }

    group.finish();
}

// ── 3. Stagnation ────────────────────────────────────────────────────

fn bench_stagnation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stagnation");
    let orders = make_orders(2520);
    let oos = make_oos(2520);
    let (in_sample, _) = oos.split(&orders);

    group.bench_function("scan_2520", |b| {
        b.iter(|| {
            detect_stagnation(
                black_box(&orders),
                &SampleSelector::default(),
                &DirectionalResolver,
                None,
            )
        });
    });

    group.bench_function("scan_in_sample_clipped", |b| {
        b.iter(|| {
            detect_stagnation(
                black_box(&in_sample),
                &SampleSelector::in_sample(),
                &DirectionalResolver,
                Some(&oos),
            )
        });
    });

    group.finish();
}

// ── 4. Stability ─────────────────────────────────────────────────────

fn bench_stability(c: &mut Criterion) {
    let mut group = c.benchmark_group("stability");
    let stability = Stability::default();

    for &n in &[252, 2520] {
        let orders = make_orders(n);
        let net: f64 = orders.iter().map(|o| o.profit_loss).sum();
        let stats = AggregatedStats::new().with(keys::NET_PROFIT, net);
        group.bench_with_input(BenchmarkId::new("daily_equity_pearson", n), &n, |b, _| {
            b.iter(|| stability.compute(&MetricInput::new(&stats, black_box(&orders))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_registry,
    bench_sharpe,
    bench_stagnation,
    bench_stability,
);
criterion_main!(benches);
