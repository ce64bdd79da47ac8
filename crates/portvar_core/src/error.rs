use std::fmt;

use crate::model::Ticker;

/// Errors caused by malformed or missing source data
#[derive(Debug)]
pub enum DataError {
    /// The source file could not be opened or read
    Io(std::io::Error),
    /// The CSV reader failed on a record
    Csv(csv::Error),
    /// The spreadsheet workbook could not be opened or parsed
    Workbook(calamine::Error),
    /// A required header is absent
    MissingColumn(&'static str),
    /// A `date` cell is not a calendar date
    InvalidDate { line: u64, value: String },
    /// A non-empty `close` cell is not a finite number
    InvalidPrice { line: u64, value: String },
    /// No date has a price for every ticker
    EmptyTable,
    /// Dates are not strictly increasing
    UnorderedDates { index: usize },
    /// The value matrix does not match the date and ticker axes
    ShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    /// A zero base price makes the percentage change undefined
    ZeroBasePrice { ticker: Ticker, date: jiff::civil::Date },
    /// Fewer than two return observations
    InsufficientHistory { rows: usize },
    /// A ticker is missing from a table or covariance matrix
    UnknownTicker(Ticker),
    /// The same ticker labels two price columns
    DuplicateTicker(Ticker),
    /// A price cell is NaN or infinite
    NonFinitePrice { ticker: Ticker, date: jiff::civil::Date },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "failed to read price data: {e}"),
            DataError::Csv(e) => write!(f, "malformed price data: {e}"),
            DataError::Workbook(e) => write!(f, "failed to read workbook: {e}"),
            DataError::MissingColumn(name) => write!(f, "required column `{name}` is missing"),
            DataError::InvalidDate { line, value } => {
                write!(f, "line {line}: `{value}` is not a valid date")
            }
            DataError::InvalidPrice { line, value } => {
                write!(f, "line {line}: `{value}` is not a valid closing price")
            }
            DataError::EmptyTable => write!(f, "price table is empty after dropping incomplete dates"),
            DataError::UnorderedDates { index } => {
                write!(f, "dates must be strictly increasing (row {index})")
            }
            DataError::ShapeMismatch { expected, actual } => write!(
                f,
                "expected a {}x{} table, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            DataError::ZeroBasePrice { ticker, date } => {
                write!(f, "{ticker} has a zero closing price on {date}")
            }
            DataError::InsufficientHistory { rows } => {
                write!(f, "need at least 2 return observations, got {rows}")
            }
            DataError::UnknownTicker(ticker) => {
                write!(f, "unknown ticker {ticker}")
            }
            DataError::DuplicateTicker(ticker) => {
                write!(f, "ticker {ticker} appears in more than one column")
            }
            DataError::NonFinitePrice { ticker, date } => {
                write!(f, "{ticker} has a non-finite closing price on {date}")
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Csv(e) => Some(e),
            DataError::Workbook(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err)
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err)
    }
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::Workbook(err)
    }
}

/// Errors caused by invalid user-supplied values
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// The ticker count is not an integer
    NotAnInteger(String),
    /// The ticker count must be at least 1
    NonPositiveCount(i64),
    /// More tickers were requested than the table holds
    TooManyTickers { requested: usize, available: usize },
    /// The return lag must be at least 1
    ZeroLag,
    /// The variance curve needs at least one asset
    ZeroMaxAssets,
    /// The variance curve cannot be longer than the portfolio
    MaxAssetsExceedsPortfolio { requested: usize, available: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotAnInteger(value) => {
                write!(f, "`{value}` is not a whole number of tickers")
            }
            InputError::NonPositiveCount(n) => {
                write!(f, "number of tickers must be at least 1, got {n}")
            }
            InputError::TooManyTickers {
                requested,
                available,
            } => write!(
                f,
                "requested {requested} tickers but only {available} are available"
            ),
            InputError::ZeroLag => write!(f, "return lag must be at least 1 period"),
            InputError::ZeroMaxAssets => write!(f, "maximum number of assets must be at least 1"),
            InputError::MaxAssetsExceedsPortfolio {
                requested,
                available,
            } => write!(
                f,
                "cannot chart {requested} assets from a portfolio of {available}"
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// An operation was invoked before its prerequisite step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    PriceTableNotLoaded,
    TickersNotSelected,
    PortfolioNotCreated,
    ReturnsNotCalculated,
    CovarianceNotCalculated,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::PriceTableNotLoaded => write!(f, "price data not loaded yet"),
            StateError::TickersNotSelected => write!(f, "tickers not selected yet"),
            StateError::PortfolioNotCreated => write!(f, "portfolio not created yet"),
            StateError::ReturnsNotCalculated => write!(f, "returns not calculated yet"),
            StateError::CovarianceNotCalculated => {
                write!(f, "covariance matrix not calculated yet")
            }
        }
    }
}

impl std::error::Error for StateError {}

/// Any failure of the analysis pipeline
#[derive(Debug)]
pub enum AnalysisError {
    Data(DataError),
    Input(InputError),
    State(StateError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Data(e) => write!(f, "{e}"),
            AnalysisError::Input(e) => write!(f, "{e}"),
            AnalysisError::State(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Data(e) => Some(e),
            AnalysisError::Input(e) => Some(e),
            AnalysisError::State(e) => Some(e),
        }
    }
}

impl From<DataError> for AnalysisError {
    fn from(err: DataError) -> Self {
        AnalysisError::Data(err)
    }
}

impl From<InputError> for AnalysisError {
    fn from(err: InputError) -> Self {
        AnalysisError::Input(err)
    }
}

impl From<StateError> for AnalysisError {
    fn from(err: StateError) -> Self {
        AnalysisError::State(err)
    }
}

impl AnalysisError {
    /// True when the failure came from a user-supplied value
    pub fn is_input(&self) -> bool {
        matches!(self, AnalysisError::Input(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
