//! Ticker identifiers and random ticker selections

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique symbol identifying a tradable asset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticker(pub String);

impl Ticker {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(value: &str) -> Self {
        Ticker(value.to_string())
    }
}

impl From<String> for Ticker {
    fn from(value: String) -> Self {
        Ticker(value)
    }
}

/// Distinct tickers in draw order.
///
/// The draw order is meaningful: the variance curve grows the portfolio one
/// ticker at a time following this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSelection {
    tickers: Vec<Ticker>,
}

impl TickerSelection {
    pub(crate) fn new(tickers: Vec<Ticker>) -> Self {
        Self { tickers }
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticker> {
        self.tickers.iter()
    }
}
