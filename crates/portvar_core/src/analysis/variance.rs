use ndarray::Array1;

use crate::error::{InputError, Result};
use crate::model::{CovarianceMatrix, Portfolio, VarianceCurve};

/// Equal-weight portfolio variance for each size `k = 1..=max_assets`.
///
/// The `k`-asset portfolio holds the first `k` tickers of `portfolio` with
/// weight `1/k` each, and its variance is the quadratic form `w' C_k w` over
/// the matching covariance submatrix. Tickers are matched by name, so the
/// covariance may list them in any order.
pub fn compute_variance_curve(
    portfolio: &Portfolio,
    covariance: &CovarianceMatrix,
    max_assets: usize,
) -> Result<VarianceCurve> {
    if max_assets == 0 {
        return Err(InputError::ZeroMaxAssets.into());
    }
    let available = portfolio.tickers().len();
    if max_assets > available {
        return Err(InputError::MaxAssetsExceedsPortfolio {
            requested: max_assets,
            available,
        }
        .into());
    }

    let mut variances = Vec::with_capacity(max_assets);
    for k in 1..=max_assets {
        let cov_k = covariance.submatrix(&portfolio.tickers()[..k])?;
        let weights = Array1::from_elem(k, 1.0 / k as f64);
        variances.push(weights.dot(&cov_k.dot(&weights)));
    }

    tracing::debug!(points = variances.len(), "computed variance curve");
    Ok(VarianceCurve::new(variances))
}
