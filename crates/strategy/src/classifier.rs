use common::{Bias, Error, Result};

use crate::indicators::{FibonacciLevels, IndicatorSnapshot};

pub const RSI_LOWER: f64 = 30.0;
pub const RSI_UPPER: f64 = 70.0;

/// Map the latest indicator values to a bias. First matching rule wins:
///
/// 1. `Long`: fast EMA above slow, `30 < rsi < 70`, close above the 50% level.
/// 2. `Short`: fast EMA below slow, `rsi > 30`, close below the 50% level.
/// 3. `None`: anything else.
///
/// The short rule has no RSI upper bound. Non-finite inputs are rejected.
pub fn classify(snapshot: &IndicatorSnapshot, fib: &FibonacciLevels) -> Result<Bias> {
    let ema_fast = finite("ema_fast", snapshot.ema_fast)?;
    let ema_slow = finite("ema_slow", snapshot.ema_slow)?;
    let rsi = finite("rsi", snapshot.rsi)?;
    let close = finite("close", snapshot.close)?;
    let mid = finite("level_50", fib.level_50)?;

    let bias = if ema_fast > ema_slow && rsi > RSI_LOWER && rsi < RSI_UPPER && close > mid {
        Bias::Long
    } else if ema_fast < ema_slow && rsi > RSI_LOWER && close < mid {
        Bias::Short
    } else {
        Bias::None
    };
    Ok(bias)
}

fn finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::MalformedSnapshot(format!("{field} is {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snap(ema_fast: f64, ema_slow: f64, rsi: f64, close: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            timestamp: Utc::now(),
            close,
            ema_fast,
            ema_slow,
            rsi,
            atr: 1.0,
        }
    }

    fn fib(level_50: f64) -> FibonacciLevels {
        FibonacciLevels {
            level_0: level_50 + 10.0,
            level_50,
            level_100: level_50 - 10.0,
        }
    }

    #[test]
    fn uptrend_above_midpoint_is_long() {
        let bias = classify(&snap(105.0, 100.0, 55.0, 110.0), &fib(100.0)).unwrap();
        assert_eq!(bias, Bias::Long);
    }

    #[test]
    fn downtrend_below_midpoint_is_short() {
        let bias = classify(&snap(95.0, 100.0, 45.0, 90.0), &fib(100.0)).unwrap();
        assert_eq!(bias, Bias::Short);
    }

    #[test]
    fn overbought_blocks_long() {
        let bias = classify(&snap(105.0, 100.0, 75.0, 110.0), &fib(100.0)).unwrap();
        assert_eq!(bias, Bias::None);
    }

    #[test]
    fn short_has_no_rsi_upper_bound() {
        let bias = classify(&snap(95.0, 100.0, 85.0, 90.0), &fib(100.0)).unwrap();
        assert_eq!(bias, Bias::Short);
    }

    #[test]
    fn oversold_blocks_short() {
        let bias = classify(&snap(95.0, 100.0, 30.0, 90.0), &fib(100.0)).unwrap();
        assert_eq!(bias, Bias::None);
    }

    #[test]
    fn rsi_bounds_are_strict_for_long() {
        assert_eq!(classify(&snap(105.0, 100.0, 30.0, 110.0), &fib(100.0)).unwrap(), Bias::None);
        assert_eq!(classify(&snap(105.0, 100.0, 70.0, 110.0), &fib(100.0)).unwrap(), Bias::None);
    }

    #[test]
    fn equal_emas_are_neither_long_nor_short() {
        let bias = classify(&snap(100.0, 100.0, 50.0, 110.0), &fib(100.0)).unwrap();
        assert_eq!(bias, Bias::None);
    }

    #[test]
    fn close_on_midpoint_is_none() {
        assert_eq!(classify(&snap(105.0, 100.0, 50.0, 100.0), &fib(100.0)).unwrap(), Bias::None);
        assert_eq!(classify(&snap(95.0, 100.0, 50.0, 100.0), &fib(100.0)).unwrap(), Bias::None);
    }

    #[test]
    fn trend_against_midpoint_is_none() {
        // Fast above slow but close below the midpoint
        let bias = classify(&snap(105.0, 100.0, 50.0, 90.0), &fib(100.0)).unwrap();
        assert_eq!(bias, Bias::None);
    }

    #[test]
    fn nan_field_is_malformed() {
        let err = classify(&snap(f64::NAN, 100.0, 50.0, 110.0), &fib(100.0)).unwrap_err();
        assert!(matches!(err, Error::MalformedSnapshot(ref m) if m.contains("ema_fast")));

        let err = classify(&snap(105.0, 100.0, 50.0, 110.0), &fib(f64::INFINITY)).unwrap_err();
        assert!(matches!(err, Error::MalformedSnapshot(ref m) if m.contains("level_50")));
    }
}
