//! Criterion benchmarks for the portvar_core analysis pipeline
//!
//! Run with: cargo bench -p portvar_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jiff::civil::date;
use ndarray::Array2;
use portvar_core::analysis::{
    build_portfolio, compute_covariance, compute_returns, compute_variance_curve, select_tickers,
};
use portvar_core::{AnalysisConfig, PriceTable, Ticker, run_analysis};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Roughly one year of daily closes, shaped like an exchange-wide dataset
fn create_table(n_tickers: usize, n_dates: usize) -> PriceTable {
    let start = date(2015, 1, 2);
    let dates = (0..n_dates)
        .map(|i| start.checked_add(jiff::Span::new().days(i as i64)).unwrap())
        .collect();
    let tickers = (0..n_tickers).map(|j| Ticker(format!("T{j:04}"))).collect();
    let prices = Array2::from_shape_fn((n_dates, n_tickers), |(t, j)| {
        50.0 + (j % 17) as f64 + 3.0 * ((t as f64) * 0.05 + j as f64).sin()
    });
    PriceTable::new(dates, tickers, prices).unwrap()
}

fn bench_run_analysis(c: &mut Criterion) {
    let table = create_table(500, 252);
    let config = AnalysisConfig::default();
    let mut group = c.benchmark_group("run_analysis");

    for n in [10, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| run_analysis(black_box(&table), n, &config, &mut rng).unwrap())
        });
    }

    group.finish();
}

fn bench_steps(c: &mut Criterion) {
    let table = create_table(500, 252);
    let mut rng = StdRng::seed_from_u64(7);
    let selection = select_tickers(&table, 100, &mut rng).unwrap();
    let portfolio = build_portfolio(&table, &selection).unwrap();
    let returns = compute_returns(&portfolio, 4).unwrap();
    let covariance = compute_covariance(&returns).unwrap();

    c.bench_function("compute_covariance_100", |b| {
        b.iter(|| compute_covariance(black_box(&returns)).unwrap())
    });
    c.bench_function("compute_variance_curve_100", |b| {
        b.iter(|| compute_variance_curve(black_box(&portfolio), &covariance, 100).unwrap())
    });
}

criterion_group!(benches, bench_run_analysis, bench_steps);
criterion_main!(benches);
