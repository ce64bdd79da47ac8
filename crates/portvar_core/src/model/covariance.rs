//! Ticker-by-ticker covariance matrix

use ndarray::Array2;

use crate::error::DataError;

use super::ids::Ticker;

/// Sample covariance of return columns, labelled by ticker on both axes
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    tickers: Vec<Ticker>,
    values: Array2<f64>,
}

impl CovarianceMatrix {
    pub(crate) fn new(tickers: Vec<Ticker>, values: Array2<f64>) -> Self {
        debug_assert_eq!(values.dim(), (tickers.len(), tickers.len()));
        Self { tickers, values }
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn index_of(&self, ticker: &Ticker) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Covariance between two tickers
    pub fn get(&self, a: &Ticker, b: &Ticker) -> Option<f64> {
        Some(self.values[[self.index_of(a)?, self.index_of(b)?]])
    }

    /// The square submatrix for `tickers`, rows and columns in the given order.
    pub fn submatrix(&self, tickers: &[Ticker]) -> Result<Array2<f64>, DataError> {
        let indices = tickers
            .iter()
            .map(|t| {
                self.index_of(t)
                    .ok_or_else(|| DataError::UnknownTicker(t.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Array2::from_shape_fn((indices.len(), indices.len()), |(i, j)| {
            self.values[[indices[i], indices[j]]]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> CovarianceMatrix {
        CovarianceMatrix::new(
            vec![Ticker::from("A"), Ticker::from("B"), Ticker::from("C")],
            array![[1.0, 0.1, 0.2], [0.1, 2.0, 0.3], [0.2, 0.3, 3.0]],
        )
    }

    #[test]
    fn test_submatrix_follows_requested_order() {
        let cov = sample();
        let sub = cov
            .submatrix(&[Ticker::from("C"), Ticker::from("A")])
            .unwrap();

        assert_eq!(sub, array![[3.0, 0.2], [0.2, 1.0]]);
    }

    #[test]
    fn test_submatrix_unknown_ticker() {
        let cov = sample();
        let err = cov.submatrix(&[Ticker::from("Z")]).unwrap_err();
        assert!(matches!(err, DataError::UnknownTicker(t) if t.as_str() == "Z"));
    }

    #[test]
    fn test_get_by_ticker() {
        let cov = sample();
        assert_eq!(cov.get(&Ticker::from("B"), &Ticker::from("C")), Some(0.3));
        assert_eq!(cov.get(&Ticker::from("B"), &Ticker::from("Q")), None);
    }
}
