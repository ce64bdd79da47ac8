use rand::Rng;

use crate::error::Result;
use crate::model::{CovarianceMatrix, PriceTable, TickerSelection, VarianceCurve};

use super::{
    AnalysisConfig, build_portfolio, compute_covariance, compute_returns,
    compute_variance_curve, select_tickers,
};

/// Everything one analysis run produces
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub selection: TickerSelection,
    pub return_lag: usize,
    /// Dates in the portfolio
    pub price_rows: usize,
    /// Dates with a defined return
    pub return_rows: usize,
    pub covariance: CovarianceMatrix,
    pub curve: VarianceCurve,
}

/// Select `n` tickers and chart their equal-weight variance curve.
pub fn run_analysis<R: Rng + ?Sized>(
    table: &PriceTable,
    n: usize,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisReport> {
    let selection = select_tickers(table, n, rng)?;
    let portfolio = build_portfolio(table, &selection)?;
    let returns = compute_returns(&portfolio, config.return_lag)?;
    let covariance = compute_covariance(&returns)?;
    let curve = compute_variance_curve(&portfolio, &covariance, config.curve_length(n))?;

    tracing::info!(
        tickers = n,
        lag = config.return_lag,
        first = curve.first(),
        last = curve.last(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        selection,
        return_lag: returns.lag(),
        price_rows: portfolio.n_rows(),
        return_rows: returns.n_rows(),
        covariance,
        curve,
    })
}
