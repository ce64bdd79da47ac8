//! The analysis pipeline
//!
//! Each step is a free function taking the output of the previous one:
//!
//! ```text
//! PriceTable -> select_tickers -> build_portfolio -> compute_returns
//!            -> compute_covariance -> compute_variance_curve
//! ```
//!
//! [`run_analysis`] chains all of them for a single ticker count, and
//! [`DataProcessor`](crate::processor::DataProcessor) offers the same steps
//! as a stateful session.

mod config;
mod covariance;
mod report;
mod returns;
mod selection;
mod variance;

pub use config::{AnalysisConfig, DEFAULT_RETURN_LAG};
pub use covariance::compute_covariance;
pub use report::{AnalysisReport, run_analysis};
pub use returns::{build_portfolio, compute_returns};
pub use selection::{parse_ticker_count, select_tickers};
pub use variance::compute_variance_curve;
