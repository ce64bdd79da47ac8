//! Price data loading
//!
//! Reads a long-format price sheet (one row per date and ticker) and pivots it
//! into a [`PriceTable`] with one column per ticker. The sheet is either a CSV
//! file or the first worksheet of a spreadsheet workbook (`.xlsx`, `.xlsm`,
//! `.xlsb`, `.xls`, `.ods`).
//!
//! Expected header names are `date`, `Name` and `close`; any other column is
//! ignored. Repeated `(date, Name)` pairs are averaged, and any date that lacks
//! a price for some ticker is dropped.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use jiff::Span;
use jiff::civil::{Date, DateTime, date};
use ndarray::Array2;
use rustc_hash::FxHashMap;

use crate::error::DataError;
use crate::model::{PriceTable, Ticker};

pub const DATE_COLUMN: &str = "date";
pub const TICKER_COLUMN: &str = "Name";
pub const CLOSE_COLUMN: &str = "close";

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load a price table from a CSV file or a spreadsheet workbook.
///
/// The format follows the file extension; anything that is not a workbook
/// extension is read as CSV. The file is opened read-only and closed before
/// returning.
pub fn load(path: impl AsRef<Path>) -> Result<PriceTable, DataError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading price data");
    if is_workbook(path) {
        load_workbook(path)
    } else {
        let file = File::open(path)?;
        load_from_reader(file)
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|w| ext.eq_ignore_ascii_case(w))
        })
}

/// Load a price table from any CSV source.
pub fn load_from_reader<R: Read>(source: R) -> Result<PriceTable, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = Columns::locate(&headers.iter().collect::<Vec<_>>())?;
    let mut pivot = Pivot::default();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let name = record.get(columns.ticker).unwrap_or("").trim();
        let close = record.get(columns.close).unwrap_or("").trim();
        if name.is_empty() || close.is_empty() {
            pivot.skip();
            continue;
        }

        let raw_date = record.get(columns.date).unwrap_or("").trim();
        let date = parse_date(raw_date).ok_or_else(|| DataError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;
        let price = parse_price(close).ok_or_else(|| DataError::InvalidPrice {
            line,
            value: close.to_string(),
        })?;

        pivot.add(date, name, price);
    }

    pivot.finish()
}

/// Read the first worksheet of a workbook.
///
/// The workbook kind is detected from the content. Date cells may be real
/// spreadsheet dates, date serials or date text.
fn load_workbook(path: &Path) -> Result<PriceTable, DataError> {
    let bytes = std::fs::read(path)?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DataError::EmptyTable)??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let columns = Columns::locate(&headers)?;

    // Sheet row of the header, so errors name the row a spreadsheet shows
    let header_row = range.start().map_or(0, |(row, _)| u64::from(row));
    let mut pivot = Pivot::default();

    for (offset, row) in rows.enumerate() {
        let line = header_row + offset as u64 + 2;
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or(Data::Empty);

        let name = cell(columns.ticker).to_string();
        let name = name.trim();
        let close = cell(columns.close);
        if name.is_empty() || is_blank(&close) {
            pivot.skip();
            continue;
        }

        let raw_date = cell(columns.date);
        let date = cell_date(&raw_date).ok_or_else(|| DataError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;
        let price = cell_price(&close).ok_or_else(|| DataError::InvalidPrice {
            line,
            value: close.to_string(),
        })?;

        pivot.add(date, name, price);
    }

    pivot.finish()
}

/// Positions of the required headers
struct Columns {
    date: usize,
    ticker: usize,
    close: usize,
}

impl Columns {
    fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self, DataError> {
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim() == name)
                .ok_or(DataError::MissingColumn(name))
        };
        Ok(Self {
            date: column(DATE_COLUMN)?,
            ticker: column(TICKER_COLUMN)?,
            close: column(CLOSE_COLUMN)?,
        })
    }
}

/// Long-to-wide accumulator shared by the CSV and workbook readers
#[derive(Default)]
struct Pivot {
    // (sum, count) per cell so duplicates average out
    cells: FxHashMap<(Date, Ticker), (f64, u32)>,
    dates: BTreeSet<Date>,
    tickers: BTreeSet<Ticker>,
    skipped: usize,
}

impl Pivot {
    fn add(&mut self, date: Date, name: &str, price: f64) {
        let ticker = Ticker::from(name);
        self.dates.insert(date);
        self.tickers.insert(ticker.clone());
        let cell = self.cells.entry((date, ticker)).or_insert((0.0, 0));
        cell.0 += price;
        cell.1 += 1;
    }

    fn skip(&mut self) {
        self.skipped += 1;
    }

    fn finish(self) -> Result<PriceTable, DataError> {
        if self.skipped > 0 {
            tracing::debug!(
                skipped = self.skipped,
                "ignored rows with a missing ticker or price"
            );
        }

        let tickers: Vec<Ticker> = self.tickers.into_iter().collect();
        let mut kept_dates = Vec::new();
        let mut values = Vec::new();

        for date in self.dates {
            let row: Option<Vec<f64>> = tickers
                .iter()
                .map(|t| {
                    self.cells
                        .get(&(date, t.clone()))
                        .map(|&(sum, count)| sum / f64::from(count))
                })
                .collect();

            if let Some(row) = row {
                kept_dates.push(date);
                values.extend(row);
            }
        }

        if kept_dates.is_empty() {
            return Err(DataError::EmptyTable);
        }

        let shape = (kept_dates.len(), tickers.len());
        let prices = Array2::from_shape_vec(shape, values).map_err(|_| {
            DataError::ShapeMismatch {
                expected: shape,
                actual: (0, 0),
            }
        })?;

        tracing::debug!(
            dates = kept_dates.len(),
            tickers = tickers.len(),
            "price table loaded"
        );
        PriceTable::new(kept_dates, tickers, prices)
    }
}

/// Accepts `YYYY-MM-DD` or a full datetime; the time of day is discarded.
fn parse_date(value: &str) -> Option<Date> {
    value
        .parse::<Date>()
        .ok()
        .or_else(|| value.parse::<DateTime>().ok().map(|dt| dt.date()))
}

fn parse_price(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|p| p.is_finite())
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_date(cell: &Data) -> Option<Date> {
    match cell {
        Data::DateTime(dt) => serial_to_date(dt.as_f64()),
        Data::Float(serial) => serial_to_date(*serial),
        Data::Int(serial) => serial_to_date(*serial as f64),
        Data::DateTimeIso(s) | Data::String(s) => parse_date(s.trim()),
        _ => None,
    }
}

fn cell_price(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(p) => Some(*p).filter(|p| p.is_finite()),
        Data::Int(p) => Some(*p as f64),
        Data::String(s) => parse_price(s.trim()),
        _ => None,
    }
}

/// Spreadsheet day serial (1900 date system) to a calendar date.
fn serial_to_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial.floor() as i64;
    date(1899, 12, 30).checked_add(Span::new().days(days)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn load_str(csv: &str) -> Result<PriceTable, DataError> {
        load_from_reader(csv.as_bytes())
    }

    #[test]
    fn test_pivots_long_format_into_columns() {
        let table = load_str(
            "date,open,close,Name\n\
             2016-01-05,1,11.0,BBB\n\
             2016-01-04,1,10.0,AAA\n\
             2016-01-04,1,20.0,BBB\n\
             2016-01-05,1,12.0,AAA\n",
        )
        .unwrap();

        assert_eq!(table.dates(), &[date(2016, 1, 4), date(2016, 1, 5)]);
        assert_eq!(table.tickers(), &[Ticker::from("AAA"), Ticker::from("BBB")]);
        assert_eq!(table.prices()[[0, 0]], 10.0);
        assert_eq!(table.prices()[[0, 1]], 20.0);
        assert_eq!(table.prices()[[1, 0]], 12.0);
        assert_eq!(table.prices()[[1, 1]], 11.0);
    }

    #[test]
    fn test_drops_dates_missing_any_ticker() {
        let table = load_str(
            "date,Name,close\n\
             2016-01-04,AAA,10\n\
             2016-01-04,BBB,20\n\
             2016-01-05,AAA,11\n\
             2016-01-05,BBB,\n\
             2016-01-06,AAA,12\n\
             2016-01-06,BBB,22\n",
        )
        .unwrap();

        assert_eq!(table.dates(), &[date(2016, 1, 4), date(2016, 1, 6)]);
    }

    #[test]
    fn test_duplicate_cells_are_averaged() {
        let table = load_str(
            "date,Name,close\n\
             2016-01-04,AAA,10\n\
             2016-01-04,AAA,14\n",
        )
        .unwrap();

        assert_eq!(table.prices()[[0, 0]], 12.0);
    }

    #[test]
    fn test_accepts_datetime_and_leading_index_column() {
        let table = load_str(
            ",date,Name,close\n\
             0,2016-01-04 00:00:00,AAA,10\n\
             1,2016-01-05T00:00:00,AAA,11\n",
        )
        .unwrap();

        assert_eq!(table.dates(), &[date(2016, 1, 4), date(2016, 1, 5)]);
    }

    #[test]
    fn test_missing_column() {
        let err = load_str("date,ticker,close\n2016-01-04,AAA,10\n").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("Name")));
    }

    #[test]
    fn test_invalid_price_reports_line() {
        let err = load_str(
            "date,Name,close\n\
             2016-01-04,AAA,10\n\
             2016-01-05,AAA,abc\n",
        )
        .unwrap_err();

        match err {
            DataError::InvalidPrice { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_date() {
        let err = load_str("date,Name,close\nyesterday,AAA,10\n").unwrap_err();
        assert!(matches!(err, DataError::InvalidDate { .. }));
    }

    #[test]
    fn test_empty_after_dropping() {
        let err = load_str(
            "date,Name,close\n\
             2016-01-04,AAA,10\n\
             2016-01-05,BBB,20\n",
        )
        .unwrap_err();
        assert!(matches!(err, DataError::EmptyTable));

        let err = load_str("date,Name,close\n").unwrap_err();
        assert!(matches!(err, DataError::EmptyTable));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, "date,Name,close\n2016-01-04,AAA,10\n").unwrap();

        let table = load(&path).unwrap();
        assert_eq!(table.n_tickers(), 1);

        let err = load(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[test]
    fn test_load_from_workbook() {
        use rust_xlsxwriter::Workbook;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["date", "open", "close", "Name"].into_iter().enumerate() {
            sheet.write_string(0, col as u16, header).unwrap();
        }
        // Date text on the first rows, a day serial (2016-01-05) on the last
        let rows = [
            ("2016-01-04", 10.0, "AAA"),
            ("2016-01-04", 20.0, "BBB"),
            ("2016-01-05", 11.0, "AAA"),
        ];
        for (i, (day, close, name)) in rows.into_iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, day).unwrap();
            sheet.write_number(row, 1, 1.0).unwrap();
            sheet.write_number(row, 2, close).unwrap();
            sheet.write_string(row, 3, name).unwrap();
        }
        sheet.write_number(4, 0, 42374.0).unwrap();
        sheet.write_number(4, 2, 22.0).unwrap();
        sheet.write_string(4, 3, "BBB").unwrap();
        workbook.save(&path).unwrap();

        let table = load(&path).unwrap();

        assert_eq!(table.dates(), &[date(2016, 1, 4), date(2016, 1, 5)]);
        assert_eq!(table.tickers(), &[Ticker::from("AAA"), Ticker::from("BBB")]);
        assert_eq!(table.prices()[[0, 1]], 20.0);
        assert_eq!(table.prices()[[1, 0]], 11.0);
        assert_eq!(table.prices()[[1, 1]], 22.0);
    }

    #[test]
    fn test_workbook_errors() {
        let dir = tempfile::tempdir().unwrap();

        let err = load(dir.path().join("missing.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));

        // Extension decides the reader, so CSV text in an .xlsx is rejected
        let path = dir.path().join("not_a_workbook.XLSX");
        std::fs::write(&path, "date,Name,close\n2016-01-04,AAA,10\n").unwrap();
        assert!(matches!(load(&path).unwrap_err(), DataError::Workbook(_)));
    }

    #[test]
    fn test_serial_dates() {
        assert_eq!(serial_to_date(42373.0), Some(date(2016, 1, 4)));
        assert_eq!(serial_to_date(42373.75), Some(date(2016, 1, 4)));
        assert_eq!(serial_to_date(0.0), None);
        assert_eq!(serial_to_date(f64::NAN), None);
    }
}
