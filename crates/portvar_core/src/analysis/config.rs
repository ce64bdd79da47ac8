use serde::{Deserialize, Serialize};

/// Number of periods between the two prices of a percentage change
pub const DEFAULT_RETURN_LAG: usize = 4;

/// Tunables for a single analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lag, in rows, used for percentage-change returns
    pub return_lag: usize,
    /// Length of the variance curve; `None` charts every selected ticker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_assets: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            return_lag: DEFAULT_RETURN_LAG,
            max_assets: None,
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn with_lag(mut self, return_lag: usize) -> Self {
        self.return_lag = return_lag;
        self
    }

    #[must_use]
    pub fn with_max_assets(mut self, max_assets: usize) -> Self {
        self.max_assets = Some(max_assets);
        self
    }

    /// Curve length for a portfolio of `n_tickers`, capped at the portfolio size
    pub fn curve_length(&self, n_tickers: usize) -> usize {
        self.max_assets.map_or(n_tickers, |m| m.min(n_tickers))
    }
}
