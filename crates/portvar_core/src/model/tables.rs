//! Date-indexed, ticker-columned tables
//!
//! [`PriceTable`], [`Portfolio`] and [`ReturnsTable`] share one layout: rows
//! are dates in strictly increasing order, columns are tickers, and the cells
//! live in a dense `ndarray` matrix. They are distinct types so that each
//! pipeline step can only accept the table its predecessor produced.

use jiff::civil::Date;
use ndarray::{Array2, Axis};
use rustc_hash::FxHashSet;

use crate::error::DataError;

use super::ids::Ticker;

/// Shared storage for every dated table
#[derive(Debug, Clone, PartialEq)]
pub struct DatedTable {
    dates: Vec<Date>,
    tickers: Vec<Ticker>,
    values: Array2<f64>,
}

impl DatedTable {
    /// Validate the axes against the matrix and the date ordering.
    pub fn new(
        dates: Vec<Date>,
        tickers: Vec<Ticker>,
        values: Array2<f64>,
    ) -> Result<Self, DataError> {
        let expected = (dates.len(), tickers.len());
        if values.dim() != expected {
            return Err(DataError::ShapeMismatch {
                expected,
                actual: values.dim(),
            });
        }
        if let Some(index) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(DataError::UnorderedDates { index: index + 1 });
        }
        Ok(Self {
            dates,
            tickers,
            values,
        })
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn n_tickers(&self) -> usize {
        self.tickers.len()
    }

    pub fn ticker_index(&self, ticker: &Ticker) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Owned copy restricted to `indices`, in the given order.
    pub(crate) fn select_columns(&self, indices: &[usize]) -> Self {
        Self {
            dates: self.dates.clone(),
            tickers: indices.iter().map(|&i| self.tickers[i].clone()).collect(),
            values: self.values.select(Axis(1), indices),
        }
    }
}

/// Closing prices for every ticker, with incomplete dates removed
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable(DatedTable);

impl PriceTable {
    /// Build a price table.
    ///
    /// Rejects tables without dates or tickers, repeated tickers and
    /// non-finite prices.
    pub fn new(
        dates: Vec<Date>,
        tickers: Vec<Ticker>,
        prices: Array2<f64>,
    ) -> Result<Self, DataError> {
        if dates.is_empty() || tickers.is_empty() {
            return Err(DataError::EmptyTable);
        }
        if let Some(dup) = first_duplicate(&tickers) {
            return Err(DataError::DuplicateTicker(dup));
        }
        let table = DatedTable::new(dates, tickers, prices)?;
        let non_finite = table.values.indexed_iter().find(|(_, p)| !p.is_finite());
        if let Some(((row, col), _)) = non_finite {
            return Err(DataError::NonFinitePrice {
                ticker: table.tickers[col].clone(),
                date: table.dates[row],
            });
        }
        Ok(Self(table))
    }

    pub fn table(&self) -> &DatedTable {
        &self.0
    }

    pub fn dates(&self) -> &[Date] {
        self.0.dates()
    }

    pub fn tickers(&self) -> &[Ticker] {
        self.0.tickers()
    }

    pub fn prices(&self) -> &Array2<f64> {
        self.0.values()
    }

    pub fn n_tickers(&self) -> usize {
        self.0.n_tickers()
    }
}

fn first_duplicate(tickers: &[Ticker]) -> Option<Ticker> {
    let mut seen = FxHashSet::default();
    tickers.iter().find(|t| !seen.insert(*t)).cloned()
}

/// A price table restricted to the selected tickers, in selection order
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio(DatedTable);

impl Portfolio {
    pub(crate) fn new(table: DatedTable) -> Self {
        Self(table)
    }

    pub fn table(&self) -> &DatedTable {
        &self.0
    }

    pub fn dates(&self) -> &[Date] {
        self.0.dates()
    }

    pub fn tickers(&self) -> &[Ticker] {
        self.0.tickers()
    }

    pub fn prices(&self) -> &Array2<f64> {
        self.0.values()
    }

    pub fn n_rows(&self) -> usize {
        self.0.n_rows()
    }
}

/// Percentage changes over a fixed lag; the first `lag` dates are absent
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsTable {
    table: DatedTable,
    lag: usize,
}

impl ReturnsTable {
    pub(crate) fn new(table: DatedTable, lag: usize) -> Self {
        Self { table, lag }
    }

    pub fn table(&self) -> &DatedTable {
        &self.table
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    pub fn dates(&self) -> &[Date] {
        self.table.dates()
    }

    pub fn tickers(&self) -> &[Ticker] {
        self.table.tickers()
    }

    pub fn returns(&self) -> &Array2<f64> {
        self.table.values()
    }

    pub fn n_rows(&self) -> usize {
        self.table.n_rows()
    }
}
