pub mod atr;
pub mod ema;
pub mod fibonacci;
pub mod rsi;

pub use atr::atr;
pub use ema::ema;
pub use fibonacci::{fibonacci_levels, FibonacciLevels};
pub use rsi::rsi;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::{Candle, Error, Result};

/// Lookbacks for the indicator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub fib_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ema_fast: 50,
            ema_slow: 200,
            rsi_period: 14,
            atr_period: 14,
            fib_window: 20,
        }
    }
}

impl IndicatorParams {
    /// Bars needed before every indicator is fully warmed.
    pub fn warm_up(&self) -> usize {
        self.ema_slow
            .max(self.rsi_period + 1)
            .max(self.atr_period)
            .max(self.fib_window)
    }
}

/// Indicator values for the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    pub atr: f64,
}

/// Everything the classifier and formatter need from one candle series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorReport {
    pub snapshot: IndicatorSnapshot,
    pub fibonacci: FibonacciLevels,
    /// False when the series was shorter than [`IndicatorParams::warm_up`].
    pub warm: bool,
}

/// Compute the full indicator set for the latest bar of `candles`.
///
/// Short series are accepted and produce partially-warmed values
/// (`warm == false`); only an empty series is an error.
pub fn compute(candles: &[Candle], params: &IndicatorParams) -> Result<IndicatorReport> {
    let last = candles.last().ok_or_else(|| {
        Error::InsufficientData("cannot compute indicators from an empty series".into())
    })?;

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fibonacci = fibonacci_levels(candles, params.fib_window)?;

    // Each series has one entry per candle, so `last()` is always present here.
    let latest = |series: Vec<f64>| series.last().copied().unwrap_or(f64::NAN);

    let snapshot = IndicatorSnapshot {
        timestamp: last.timestamp,
        close: last.close,
        ema_fast: latest(ema(&closes, params.ema_fast)),
        ema_slow: latest(ema(&closes, params.ema_slow)),
        rsi: latest(rsi(&closes, params.rsi_period)),
        atr: latest(atr(candles, params.atr_period)),
    };

    Ok(IndicatorReport {
        snapshot,
        fibonacci,
        warm: candles.len() >= params.warm_up(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle {
                timestamp: Utc.timestamp_opt(i as i64 * 14_400, 0).unwrap(),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 10.0,
            })
            .collect()
    }

    #[test]
    fn empty_series_is_insufficient_data() {
        let err = compute(&[], &IndicatorParams::default()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn single_candle_degrades_instead_of_failing() {
        let report = compute(&series(&[100.0]), &IndicatorParams::default()).unwrap();
        assert!(!report.warm);
        assert_eq!(report.snapshot.ema_fast, 100.0);
        assert_eq!(report.snapshot.ema_slow, 100.0);
        assert!((report.snapshot.atr - 2.0).abs() < 1e-9);
    }

    #[test]
    fn long_series_is_warm() {
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64 * 0.1).collect();
        let report = compute(&series(&closes), &IndicatorParams::default()).unwrap();
        assert!(report.warm);
        assert_eq!(report.snapshot.close, *closes.last().unwrap());
        assert!(report.snapshot.ema_fast > report.snapshot.ema_slow);
    }

    #[test]
    fn snapshot_carries_latest_timestamp() {
        let candles = series(&[1.0, 2.0, 3.0]);
        let report = compute(&candles, &IndicatorParams::default()).unwrap();
        assert_eq!(report.snapshot.timestamp, candles[2].timestamp);
    }

    #[test]
    fn warm_up_is_the_longest_lookback() {
        assert_eq!(IndicatorParams::default().warm_up(), 200);
    }
}
