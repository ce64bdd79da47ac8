//! Seam between the terminal shell and the analysis core.
//!
//! The shell only knows the [`Analyzer`] trait. [`TableAnalyzer`] is the
//! production implementation over a loaded [`PriceTable`]; tests swap in a
//! stub.

use std::path::PathBuf;

use jiff::civil::Date;
use portvar_core::{AnalysisConfig, AnalysisError, AnalysisReport, PriceTable, run_analysis};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// What the start and count screens show about the loaded data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub source: PathBuf,
    pub tickers: usize,
    pub dates: usize,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
}

impl DatasetSummary {
    pub fn from_table(source: PathBuf, table: &PriceTable) -> Self {
        Self {
            source,
            tickers: table.n_tickers(),
            dates: table.dates().len(),
            first_date: table.dates().first().copied(),
            last_date: table.dates().last().copied(),
        }
    }
}

pub trait Analyzer {
    fn dataset(&self) -> &DatasetSummary;

    /// Run one analysis over `n` randomly selected tickers.
    fn analyze(&mut self, n: usize) -> Result<AnalysisReport, AnalysisError>;
}

pub struct TableAnalyzer {
    table: PriceTable,
    summary: DatasetSummary,
    config: AnalysisConfig,
    rng: StdRng,
}

impl TableAnalyzer {
    /// `seed` fixes the ticker draws; `None` seeds from the OS.
    pub fn new(
        source: PathBuf,
        table: PriceTable,
        config: AnalysisConfig,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let summary = DatasetSummary::from_table(source, &table);
        Self {
            table,
            summary,
            config,
            rng,
        }
    }
}

impl Analyzer for TableAnalyzer {
    fn dataset(&self) -> &DatasetSummary {
        &self.summary
    }

    fn analyze(&mut self, n: usize) -> Result<AnalysisReport, AnalysisError> {
        tracing::debug!(tickers = n, lag = self.config.return_lag, "running analysis");
        run_analysis(&self.table, n, &self.config, &mut self.rng)
    }
}
