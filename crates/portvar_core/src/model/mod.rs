mod covariance;
mod curve;
mod ids;
mod tables;

pub use covariance::CovarianceMatrix;
pub use curve::VarianceCurve;
pub use ids::{Ticker, TickerSelection};
pub use tables::{DatedTable, Portfolio, PriceTable, ReturnsTable};
