use ndarray::s;

use crate::error::{DataError, InputError, Result};
use crate::model::{DatedTable, Portfolio, PriceTable, ReturnsTable, TickerSelection};

/// Project the price table onto the selected tickers, in selection order.
///
/// The portfolio owns a copy of the prices; it shares nothing with `table`.
pub fn build_portfolio(table: &PriceTable, selection: &TickerSelection) -> Result<Portfolio> {
    let indices = selection
        .iter()
        .map(|t| {
            table
                .table()
                .ticker_index(t)
                .ok_or_else(|| DataError::UnknownTicker(t.clone()))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Portfolio::new(table.table().select_columns(&indices)))
}

/// Percentage change of each column over `lag` rows.
///
/// Row `t` of the result is `price[t] / price[t - lag] - 1` and is dated
/// `dates[t]`; the first `lag` rows have no base price and are dropped.
pub fn compute_returns(portfolio: &Portfolio, lag: usize) -> Result<ReturnsTable> {
    if lag == 0 {
        return Err(InputError::ZeroLag.into());
    }

    let prices = portfolio.prices();
    let n_rows = portfolio.n_rows();
    let kept = n_rows.saturating_sub(lag);

    let base = prices.slice(s![..kept, ..]);
    let current = prices.slice(s![n_rows - kept.., ..]);

    if let Some(((row, col), _)) = base.indexed_iter().find(|(_, p)| **p == 0.0) {
        return Err(DataError::ZeroBasePrice {
            ticker: portfolio.tickers()[col].clone(),
            date: portfolio.dates()[row],
        }
        .into());
    }

    let returns = &current / &base - 1.0;
    let dates = portfolio.dates()[n_rows - kept..].to_vec();

    tracing::debug!(lag, rows = kept, "computed returns");
    let table = DatedTable::new(dates, portfolio.tickers().to_vec(), returns)?;
    Ok(ReturnsTable::new(table, lag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::model::Ticker;
    use jiff::civil::date;
    use ndarray::{Array2, array};

    fn daily_table(prices: Array2<f64>, tickers: &[&str]) -> PriceTable {
        let dates = (0..prices.nrows())
            .map(|i| date(2016, 1, 1 + i as i8))
            .collect();
        PriceTable::new(
            dates,
            tickers.iter().map(|t| Ticker::from(*t)).collect(),
            prices,
        )
        .unwrap()
    }

    fn whole_portfolio(table: &PriceTable) -> Portfolio {
        let selection = TickerSelection::new(table.tickers().to_vec());
        build_portfolio(table, &selection).unwrap()
    }

    #[test]
    fn test_portfolio_is_independent_copy() {
        let table = daily_table(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], &["A", "B", "C"]);
        let selection = TickerSelection::new(vec![Ticker::from("C"), Ticker::from("A")]);

        let portfolio = build_portfolio(&table, &selection).unwrap();
        drop(table);

        assert_eq!(portfolio.tickers(), selection.tickers());
        assert_eq!(portfolio.prices(), &array![[3.0, 1.0], [6.0, 4.0]]);
    }

    #[test]
    fn test_unknown_ticker_rejected() {
        let table = daily_table(array![[1.0], [2.0]], &["A"]);
        let selection = TickerSelection::new(vec![Ticker::from("Z")]);
        let err = build_portfolio(&table, &selection).unwrap_err();
        assert!(matches!(err, AnalysisError::Data(DataError::UnknownTicker(_))));
    }

    #[test]
    fn test_returns_over_lag() {
        let table = daily_table(
            array![[10.0], [20.0], [11.0], [30.0], [40.0]],
            &["A"],
        );
        let returns = compute_returns(&whole_portfolio(&table), 2).unwrap();

        assert_eq!(returns.n_rows(), 3);
        assert_eq!(returns.dates()[0], date(2016, 1, 3));
        let r = returns.returns();
        assert!((r[[0, 0]] - 0.1).abs() < 1e-12);
        assert!((r[[1, 0]] - 0.5).abs() < 1e-12);
        assert!((r[[2, 0]] - (40.0 / 11.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_short_history_yields_empty_returns() {
        let table = daily_table(array![[1.0], [2.0], [3.0]], &["A"]);
        let returns = compute_returns(&whole_portfolio(&table), 4).unwrap();
        assert_eq!(returns.n_rows(), 0);
        assert_eq!(returns.tickers(), table.tickers());
    }

    #[test]
    fn test_zero_lag_rejected() {
        let table = daily_table(array![[1.0], [2.0]], &["A"]);
        let err = compute_returns(&whole_portfolio(&table), 0).unwrap_err();
        assert!(matches!(err, AnalysisError::Input(InputError::ZeroLag)));
    }

    #[test]
    fn test_zero_base_price_rejected() {
        let table = daily_table(array![[1.0, 0.0], [2.0, 1.0], [3.0, 2.0]], &["A", "B"]);
        let err = compute_returns(&whole_portfolio(&table), 1).unwrap_err();
        match err {
            AnalysisError::Data(DataError::ZeroBasePrice { ticker, date: d }) => {
                assert_eq!(ticker, Ticker::from("B"));
                assert_eq!(d, date(2016, 1, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
