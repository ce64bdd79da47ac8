//! Shared fixtures for the shell tests

use std::fmt::Write;
use std::path::PathBuf;

use portvar_core::{
    AnalysisConfig, AnalysisError, AnalysisReport, DataError, PriceTable, loader,
};

use crate::analyzer::{Analyzer, DatasetSummary, TableAnalyzer};

/// Four tickers over twelve days starting 2016-01-01
pub(crate) fn sample_table() -> PriceTable {
    let mut csv = String::from("date,Name,close\n");
    for day in 1..=12u32 {
        for (i, name) in ["AAA", "BBB", "CCC", "DDD"].iter().enumerate() {
            let i = i as u32;
            let price = 10.0 + f64::from(day * (i + 1)) * 0.5 + f64::from((day * 7 + i * 3) % 5);
            writeln!(csv, "2016-01-{day:02},{name},{price}").unwrap();
        }
    }
    loader::load_from_reader(csv.as_bytes()).unwrap()
}

pub(crate) fn real_analyzer() -> TableAnalyzer {
    TableAnalyzer::new(
        PathBuf::from("sample.csv"),
        sample_table(),
        AnalysisConfig::default(),
        Some(42),
    )
}

/// Counts calls and fails every analysis with a data error
pub(crate) struct StubAnalyzer {
    summary: DatasetSummary,
    pub calls: usize,
}

impl StubAnalyzer {
    pub fn new(tickers: usize) -> Self {
        Self {
            summary: DatasetSummary {
                source: PathBuf::from("stub.csv"),
                tickers,
                ..Default::default()
            },
            calls: 0,
        }
    }
}

impl Analyzer for StubAnalyzer {
    fn dataset(&self) -> &DatasetSummary {
        &self.summary
    }

    fn analyze(&mut self, _n: usize) -> Result<AnalysisReport, AnalysisError> {
        self.calls += 1;
        Err(DataError::InsufficientHistory { rows: 1 }.into())
    }
}
