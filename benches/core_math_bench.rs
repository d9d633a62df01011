use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use perfchart::api::{ChartComposer, ChartComposerConfig};
use perfchart::comparison::{ComparisonSet, NewRun, RunId};
use perfchart::core::{GapPolicy, RangeMapper, Series, Viewport, build_plot_geometry};
use perfchart::payload::{BacktestPayload, ResultRow, RunParams};
use std::hint::black_box;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 2).expect("valid date")
}

fn equity_curve(len: usize, drift: f64) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            let value = 100_000.0 + t * drift + (t * 0.05).sin() * 1_500.0;
            if i % 97 == 0 { f64::NAN } else { value }
        })
        .collect()
}

fn bench_plot_geometry_10k(c: &mut Criterion) {
    let series = Series::daily(start(), &equity_curve(10_000, 3.0));
    let mapper = RangeMapper::from_series(&series).expect("mapper");

    c.bench_function("plot_geometry_10k", |b| {
        b.iter(|| {
            let _ = build_plot_geometry(
                black_box(&series),
                black_box(&mapper),
                black_box(series.len()),
                GapPolicy::Break,
            );
        })
    });
}

fn bench_pooled_range_8x2k(c: &mut Criterion) {
    let series: Vec<Series> = (0..8)
        .map(|k| Series::daily(start(), &equity_curve(2_000, f64::from(k))))
        .collect();

    c.bench_function("pooled_range_8x2k", |b| {
        b.iter(|| {
            let _ = RangeMapper::pooled(black_box(&series)).expect("mapper");
        })
    });
}

fn bench_compose_comparison_8x2k(c: &mut Criterion) {
    let mut set = ComparisonSet::new();
    for k in 0..8 {
        let results = equity_curve(2_000, f64::from(k))
            .into_iter()
            .enumerate()
            .map(|(offset, value)| {
                let date = start()
                    .checked_add_days(chrono::Days::new(offset as u64))
                    .expect("date in range");
                ResultRow::new(date, value.is_finite().then_some(value))
            })
            .collect();
        set.add(NewRun::new(
            RunId::new(format!("bench-{k}")),
            format!("Strategy {k}"),
            RunParams::new("SPY", start(), start()),
            BacktestPayload {
                results,
                ..BacktestPayload::default()
            },
        ))
        .expect("add run");
    }
    let composer =
        ChartComposer::new(ChartComposerConfig::new(Viewport::new(1920, 1080))).expect("composer");

    c.bench_function("compose_comparison_8x2k", |b| {
        b.iter(|| {
            let _ = composer.render_comparison_view(black_box(&set));
        })
    });
}

criterion_group!(
    benches,
    bench_plot_geometry_10k,
    bench_pooled_range_8x2k,
    bench_compose_comparison_8x2k
);
criterion_main!(benches);
