//! Portfolio variance as a function of portfolio size

use serde::{Deserialize, Serialize};

/// Equal-weight portfolio variances for sizes `1..=len()`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VarianceCurve {
    values: Vec<f64>,
}

impl VarianceCurve {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Variance of the `k`-asset portfolio (1-based)
    pub fn at(&self, k: usize) -> Option<f64> {
        k.checked_sub(1).and_then(|i| self.values.get(i)).copied()
    }

    /// `(k, variance)` pairs with `k` starting at 1
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (i + 1, v))
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Largest variance on the curve (0.0 when empty)
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0_f64, f64::max)
    }

    /// Variance of the full portfolio relative to the single-asset variance.
    ///
    /// Values below 1.0 mean that adding assets reduced risk.
    pub fn diversification_ratio(&self) -> Option<f64> {
        let first = self.first()?;
        if first == 0.0 {
            return None;
        }
        Some(self.last()? / first)
    }
}
