use rand::Rng;

use crate::error::InputError;
use crate::model::{PriceTable, TickerSelection};

/// Draw `n` distinct tickers uniformly at random, without replacement.
///
/// The returned order is the draw order.
pub fn select_tickers<R: Rng + ?Sized>(
    table: &PriceTable,
    n: usize,
    rng: &mut R,
) -> Result<TickerSelection, InputError> {
    let available = table.n_tickers();
    if n == 0 {
        return Err(InputError::NonPositiveCount(0));
    }
    if n > available {
        return Err(InputError::TooManyTickers {
            requested: n,
            available,
        });
    }

    let tickers = rand::seq::index::sample(rng, available, n)
        .into_iter()
        .map(|i| table.tickers()[i].clone())
        .collect();

    Ok(TickerSelection::new(tickers))
}

/// Parse a user-typed ticker count, checking it against `available`.
pub fn parse_ticker_count(input: &str, available: usize) -> Result<usize, InputError> {
    let trimmed = input.trim();
    let n: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotAnInteger(trimmed.to_string()))?;
    if n <= 0 {
        return Err(InputError::NonPositiveCount(n));
    }
    let n = usize::try_from(n).map_err(|_| InputError::NotAnInteger(trimmed.to_string()))?;
    if n > available {
        return Err(InputError::TooManyTickers {
            requested: n,
            available,
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ticker_count() {
        assert_eq!(parse_ticker_count(" 3 ", 5), Ok(3));
        assert_eq!(parse_ticker_count("5", 5), Ok(5));
        assert_eq!(
            parse_ticker_count("abc", 5),
            Err(InputError::NotAnInteger("abc".to_string()))
        );
        assert_eq!(
            parse_ticker_count("2.5", 5),
            Err(InputError::NotAnInteger("2.5".to_string()))
        );
        assert_eq!(parse_ticker_count("0", 5), Err(InputError::NonPositiveCount(0)));
        assert_eq!(parse_ticker_count("-2", 5), Err(InputError::NonPositiveCount(-2)));
        assert_eq!(
            parse_ticker_count("6", 5),
            Err(InputError::TooManyTickers {
                requested: 6,
                available: 5
            })
        );
    }
}
