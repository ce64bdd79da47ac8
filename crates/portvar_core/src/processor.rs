//! Stateful analysis session
//!
//! [`DataProcessor`] walks the same steps as the free functions in
//! [`analysis`](crate::analysis) but keeps each intermediate result, so a
//! caller can drive the pipeline one step at a time. A step invoked before
//! its prerequisite fails with [`StateError`]. Re-running a step discards
//! everything derived from its previous output.

use std::path::Path;

use rand::Rng;

use crate::analysis::{self, AnalysisConfig};
use crate::error::{Result, StateError};
use crate::loader;
use crate::model::{
    CovarianceMatrix, Portfolio, PriceTable, ReturnsTable, TickerSelection, VarianceCurve,
};

#[derive(Debug, Default)]
pub struct DataProcessor {
    config: AnalysisConfig,
    table: Option<PriceTable>,
    selection: Option<TickerSelection>,
    portfolio: Option<Portfolio>,
    returns: Option<ReturnsTable>,
    covariance: Option<CovarianceMatrix>,
}

impl DataProcessor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Read the price table from `path`, replacing any previous session data.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&PriceTable> {
        let table = loader::load(path)?;
        Ok(self.set_table(table))
    }

    /// Use an already built price table, replacing any previous session data.
    pub fn set_table(&mut self, table: PriceTable) -> &PriceTable {
        self.clear_from_selection();
        self.table.insert(table)
    }

    pub fn select_tickers<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<&TickerSelection> {
        let table = self.table.as_ref().ok_or(StateError::PriceTableNotLoaded)?;
        let selection = analysis::select_tickers(table, n, rng)?;
        self.clear_from_selection();
        Ok(&*self.selection.insert(selection))
    }

    pub fn build_portfolio(&mut self) -> Result<&Portfolio> {
        let table = self.table.as_ref().ok_or(StateError::PriceTableNotLoaded)?;
        let selection = self
            .selection
            .as_ref()
            .ok_or(StateError::TickersNotSelected)?;
        let portfolio = analysis::build_portfolio(table, selection)?;
        self.returns = None;
        self.covariance = None;
        Ok(&*self.portfolio.insert(portfolio))
    }

    /// Percentage-change returns over the configured lag
    pub fn compute_returns(&mut self) -> Result<&ReturnsTable> {
        let portfolio = self
            .portfolio
            .as_ref()
            .ok_or(StateError::PortfolioNotCreated)?;
        let returns = analysis::compute_returns(portfolio, self.config.return_lag)?;
        self.covariance = None;
        Ok(&*self.returns.insert(returns))
    }

    pub fn compute_covariance(&mut self) -> Result<&CovarianceMatrix> {
        let returns = self
            .returns
            .as_ref()
            .ok_or(StateError::ReturnsNotCalculated)?;
        let covariance = analysis::compute_covariance(returns)?;
        Ok(&*self.covariance.insert(covariance))
    }

    pub fn compute_variance_curve(&self, max_assets: usize) -> Result<VarianceCurve> {
        let portfolio = self
            .portfolio
            .as_ref()
            .ok_or(StateError::PortfolioNotCreated)?;
        let covariance = self
            .covariance
            .as_ref()
            .ok_or(StateError::CovarianceNotCalculated)?;
        analysis::compute_variance_curve(portfolio, covariance, max_assets)
    }

    pub fn table(&self) -> Option<&PriceTable> {
        self.table.as_ref()
    }

    pub fn selection(&self) -> Option<&TickerSelection> {
        self.selection.as_ref()
    }

    pub fn portfolio(&self) -> Option<&Portfolio> {
        self.portfolio.as_ref()
    }

    pub fn returns(&self) -> Option<&ReturnsTable> {
        self.returns.as_ref()
    }

    pub fn covariance(&self) -> Option<&CovarianceMatrix> {
        self.covariance.as_ref()
    }

    fn clear_from_selection(&mut self) {
        self.selection = None;
        self.portfolio = None;
        self.returns = None;
        self.covariance = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::tests::fixtures::three_ticker_table;
    use rand::SeedableRng;

    #[test]
    fn test_steps_require_prerequisites() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut processor = DataProcessor::default();

        let err = processor.select_tickers(2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::State(StateError::PriceTableNotLoaded)
        ));

        processor.set_table(three_ticker_table());

        assert!(matches!(
            processor.build_portfolio().unwrap_err(),
            AnalysisError::State(StateError::TickersNotSelected)
        ));
        assert!(matches!(
            processor.compute_returns().unwrap_err(),
            AnalysisError::State(StateError::PortfolioNotCreated)
        ));
        assert!(matches!(
            processor.compute_covariance().unwrap_err(),
            AnalysisError::State(StateError::ReturnsNotCalculated)
        ));
        assert!(matches!(
            processor.compute_variance_curve(2).unwrap_err(),
            AnalysisError::State(StateError::PortfolioNotCreated)
        ));

        processor.select_tickers(2, &mut rng).unwrap();
        processor.build_portfolio().unwrap();
        assert!(matches!(
            processor.compute_variance_curve(2).unwrap_err(),
            AnalysisError::State(StateError::CovarianceNotCalculated)
        ));
    }

    #[test]
    fn test_full_session() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut processor = DataProcessor::new(AnalysisConfig::default());
        processor.set_table(three_ticker_table());

        processor.select_tickers(3, &mut rng).unwrap();
        processor.build_portfolio().unwrap();
        assert_eq!(processor.compute_returns().unwrap().n_rows(), 6);
        processor.compute_covariance().unwrap();

        let curve = processor.compute_variance_curve(3).unwrap();
        assert_eq!(curve.len(), 3);
    }

    #[test]
    fn test_reselecting_clears_derived_results() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut processor = DataProcessor::default();
        processor.set_table(three_ticker_table());

        processor.select_tickers(2, &mut rng).unwrap();
        processor.build_portfolio().unwrap();
        processor.compute_returns().unwrap();
        processor.compute_covariance().unwrap();

        processor.select_tickers(1, &mut rng).unwrap();
        assert!(processor.portfolio().is_none());
        assert!(processor.returns().is_none());
        assert!(processor.covariance().is_none());
        assert_eq!(processor.selection().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_failed_selection_keeps_previous_state() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut processor = DataProcessor::default();
        processor.set_table(three_ticker_table());
        processor.select_tickers(2, &mut rng).unwrap();
        processor.build_portfolio().unwrap();

        let err = processor.select_tickers(4, &mut rng).unwrap_err();
        assert!(err.is_input());
        assert!(processor.portfolio().is_some());
    }
}
