//! Terminal front end for the portfolio variance analysis
//!
//! Three screens drive one run: a start page, a form asking how many tickers
//! to draw, and the resulting variance curve with chart export.

pub mod analyzer;
pub mod app;
pub mod components;
pub mod config;
pub mod export;
pub mod logging;
pub mod screens;
pub mod state;
pub mod util;

#[cfg(test)]
mod tests;

pub use analyzer::{Analyzer, DatasetSummary, TableAnalyzer};
pub use app::App;
pub use config::{AppConfig, ConfigOverrides};
pub use logging::init_logging;
