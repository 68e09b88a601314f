use common::Candle;

/// Range-based volatility proxy: rolling mean of `high − low` over the last
/// `period` bars, one output per input. Previous closes are not considered.
/// Warm-up bars average whatever bars are available.
pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let ranges: Vec<f64> = candles.iter().map(|c| c.high - c.low).collect();

    let mut out = Vec::with_capacity(ranges.len());
    let mut sum = 0.0;
    for i in 0..ranges.len() {
        sum += ranges[i];
        if i >= period {
            sum -= ranges[i - period];
        }
        let n = (i + 1).min(period);
        out.push(sum / n as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar(i: i64, high: f64, low: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(i * 3600, 0).unwrap(),
            open: low,
            high,
            low,
            close: high,
            volume: 1.0,
        }
    }

    #[test]
    fn atr_of_constant_range_is_that_range() {
        let candles: Vec<Candle> = (0..20).map(|i| bar(i, 105.0, 100.0)).collect();
        let out = atr(&candles, 14);
        assert!(out.iter().all(|v| (v - 5.0).abs() < 1e-9));
    }

    #[test]
    fn atr_drops_bars_outside_the_window() {
        let mut candles: Vec<Candle> = (0..5).map(|i| bar(i, 110.0, 100.0)).collect();
        candles.extend((5..8).map(|i| bar(i, 102.0, 100.0)));
        let out = atr(&candles, 3);
        assert!((out.last().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn atr_warm_up_uses_partial_window() {
        let candles = vec![bar(0, 104.0, 100.0), bar(1, 102.0, 100.0)];
        let out = atr(&candles, 14);
        assert!((out[0] - 4.0).abs() < 1e-9);
        assert!((out[1] - 3.0).abs() < 1e-9);
    }
}
