/// Substituted for an empty (or zero) side of the gain/loss ratio.
pub const EMPTY_SIDE_FLOOR: f64 = 0.01;

/// Relative strength index over close-to-close ratios, one output per input.
///
/// For each bar the window holds up to `period` ratios `close[i] / close[i-1]`.
/// RS is the mean of the ratios above 1 divided by the mean of the ratios at
/// or below 1, and RSI = `100 − 100 / (1 + RS)`. A side with no members is
/// replaced by [`EMPTY_SIDE_FLOOR`], so RS is always positive and finite and
/// the result stays inside (0, 100). Bars before the first full window use the
/// ratios seen so far; the very first bar has none and reads 50.
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);

    // ratios[i] pairs with closes[i + 1]
    let ratios: Vec<Option<f64>> = closes
        .windows(2)
        .map(|w| {
            let r = w[1] / w[0];
            r.is_finite().then_some(r)
        })
        .collect();

    (0..closes.len())
        .map(|i| {
            let end = i; // exclusive bound into `ratios`
            let start = end.saturating_sub(period);
            rsi_of_window(&ratios[start..end])
        })
        .collect()
}

fn rsi_of_window(window: &[Option<f64>]) -> f64 {
    let (mut gain_sum, mut gain_n, mut loss_sum, mut loss_n) = (0.0, 0usize, 0.0, 0usize);
    for r in window.iter().flatten() {
        if *r > 1.0 {
            gain_sum += r;
            gain_n += 1;
        } else {
            loss_sum += r;
            loss_n += 1;
        }
    }

    let gains = side_mean(gain_sum, gain_n);
    let losses = side_mean(loss_sum, loss_n);
    let rs = gains / losses;
    100.0 - 100.0 / (1.0 + rs)
}

fn side_mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        return EMPTY_SIDE_FLOOR;
    }
    let mean = sum / n as f64;
    if mean > 0.0 && mean.is_finite() {
        mean
    } else {
        EMPTY_SIDE_FLOOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_has_one_value_per_close() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i % 4) as f64).collect();
        assert_eq!(rsi(&prices, 14).len(), 30);
    }

    #[test]
    fn first_bar_is_neutral() {
        let out = rsi(&[100.0, 101.0], 14);
        assert!((out[0] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn all_gains_reads_near_100() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let value = *rsi(&prices, 14).last().unwrap();
        assert!(value > 95.0 && value < 100.0, "expected near 100, got {value}");
    }

    #[test]
    fn all_losses_reads_near_0() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 * 0.99f64.powi(i)).collect();
        let value = *rsi(&prices, 14).last().unwrap();
        assert!(value > 0.0 && value < 5.0, "expected near 0, got {value}");
    }

    #[test]
    fn mixed_window_stays_in_range() {
        let prices = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.15, 43.61, 44.33, 44.83, 45.10,
            45.15, 44.34, 44.09,
        ];
        for v in rsi(&prices, 14) {
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {v}");
        }
    }

    #[test]
    fn zero_close_does_not_poison_the_window() {
        let out = rsi(&[0.0, 10.0, 11.0, 12.0], 14);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn window_only_looks_back_period_ratios() {
        // Ten losing bars, then exactly three gaining bars: a 3-period window
        // sees only gains.
        let mut prices: Vec<f64> = (0..10).map(|i| 200.0 - i as f64).collect();
        prices.extend([192.0, 194.0, 196.0]);
        let value = *rsi(&prices, 3).last().unwrap();
        assert!(value > 95.0, "expected gains-only reading, got {value}");
    }

    #[test]
    fn ratio_means_give_exact_value() {
        // Ratios 1.02 and 0.98: RS = 1.02 / 0.98, RSI = 100 - 49 = 51.
        let out = rsi(&[100.0, 102.0, 99.96], 14);
        assert!((out[2] - 51.0).abs() < 1e-9, "got {}", out[2]);
    }

    #[test]
    fn empty_loss_side_uses_floor() {
        // One ratio of 1.1 against the 0.01 floor: RS = 110.
        let out = rsi(&[100.0, 110.0], 14);
        let expected = 100.0 - 100.0 / 111.0;
        assert!((out[1] - expected).abs() < 1e-9, "got {}", out[1]);
    }
}
