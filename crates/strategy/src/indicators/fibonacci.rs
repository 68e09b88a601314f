use serde::{Deserialize, Serialize};

use common::{Candle, Error, Result};

/// Retracement levels from the recent high/low range.
///
/// `level_0` is the window high, `level_100` the window low and `level_50`
/// the midpoint. For any non-degenerate window
/// `level_0 >= level_50 >= level_100`; a flat window collapses all three.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub level_0: f64,
    pub level_50: f64,
    pub level_100: f64,
}

/// Levels over the trailing `window` candles (the whole series if shorter).
pub fn fibonacci_levels(candles: &[Candle], window: usize) -> Result<FibonacciLevels> {
    if candles.is_empty() {
        return Err(Error::InsufficientData(
            "cannot compute Fibonacci levels from an empty series".into(),
        ));
    }
    let start = candles.len().saturating_sub(window.max(1));
    let recent = &candles[start..];

    let high = recent.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = recent.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let diff = high - low;

    Ok(FibonacciLevels {
        level_0: high,
        level_50: high - 0.5 * diff,
        level_100: low,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar(i: i64, high: f64, low: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(i * 60, 0).unwrap(),
            open: low,
            high,
            low,
            close: low,
            volume: 0.0,
        }
    }

    #[test]
    fn empty_series_is_insufficient() {
        assert!(matches!(
            fibonacci_levels(&[], 20),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn levels_span_the_window_range() {
        let candles = vec![bar(0, 110.0, 100.0), bar(1, 120.0, 105.0), bar(2, 115.0, 90.0)];
        let fib = fibonacci_levels(&candles, 20).unwrap();
        assert_eq!(fib.level_0, 120.0);
        assert_eq!(fib.level_100, 90.0);
        assert!((fib.level_50 - 105.0).abs() < 1e-12);
    }

    #[test]
    fn only_trailing_window_counts() {
        let mut candles = vec![bar(0, 500.0, 1.0)];
        candles.extend((1..=20).map(|i| bar(i, 101.0, 99.0)));
        let fib = fibonacci_levels(&candles, 20).unwrap();
        assert_eq!(fib.level_0, 101.0);
        assert_eq!(fib.level_100, 99.0);
    }

    #[test]
    fn flat_window_collapses_levels() {
        let candles: Vec<Candle> = (0..5).map(|i| bar(i, 100.0, 100.0)).collect();
        let fib = fibonacci_levels(&candles, 20).unwrap();
        assert_eq!(fib.level_0, fib.level_50);
        assert_eq!(fib.level_50, fib.level_100);
    }
}
