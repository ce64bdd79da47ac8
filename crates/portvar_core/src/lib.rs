//! Portfolio variance analysis library
//!
//! This crate loads historical closing prices, draws a random subset of
//! tickers and measures how the variance of an equal-weight portfolio falls
//! as more of those tickers are added. It supports:
//! - Loading long-format price sheets (`date`, `Name`, `close`) from CSV or
//!   spreadsheet workbooks into a date-by-ticker
//!   [`PriceTable`](model::PriceTable)
//! - Uniform ticker selection without replacement
//! - Lagged percentage-change returns and their sample covariance
//! - The equal-weight variance curve for portfolio sizes `1..=k`
//!
//! # Example
//!
//! ```ignore
//! use portvar_core::{AnalysisConfig, loader, run_analysis};
//!
//! let table = loader::load("NYSE_2015_to_2016.xlsx")?;
//! let mut rng = rand::rng();
//! let report = run_analysis(&table, 20, &AnalysisConfig::default(), &mut rng)?;
//! for (k, variance) in report.curve.points() {
//!     println!("{k:>3} {variance:.6}");
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod loader;
pub mod processor;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{AnalysisConfig, AnalysisReport, DEFAULT_RETURN_LAG, run_analysis};
pub use error::{AnalysisError, DataError, InputError, StateError};
pub use model::{
    CovarianceMatrix, Portfolio, PriceTable, ReturnsTable, Ticker, TickerSelection,
    VarianceCurve,
};
pub use processor::DataProcessor;
