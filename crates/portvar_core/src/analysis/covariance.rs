use ndarray::{Array2, Axis};

use crate::error::{DataError, Result};
use crate::model::{CovarianceMatrix, ReturnsTable};

/// Sample covariance (n - 1 denominator) of the return columns.
///
/// Only the upper triangle is computed; the lower one is mirrored from it so
/// the result is exactly symmetric.
pub fn compute_covariance(returns: &ReturnsTable) -> Result<CovarianceMatrix> {
    let n_rows = returns.n_rows();
    if n_rows < 2 {
        return Err(DataError::InsufficientHistory { rows: n_rows }.into());
    }

    let data = returns.returns();
    let mean = data
        .mean_axis(Axis(0))
        .ok_or(DataError::InsufficientHistory { rows: n_rows })?;
    let centered = data - &mean;
    let denom = (n_rows - 1) as f64;

    let k = returns.tickers().len();
    let mut values = Array2::zeros((k, k));
    for i in 0..k {
        for j in i..k {
            let c = centered.column(i).dot(&centered.column(j)) / denom;
            values[[i, j]] = c;
            values[[j, i]] = c;
        }
    }

    tracing::debug!(tickers = k, observations = n_rows, "computed covariance");
    Ok(CovarianceMatrix::new(returns.tickers().to_vec(), values))
}
