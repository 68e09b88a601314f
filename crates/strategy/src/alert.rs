use serde::{Deserialize, Serialize};

use common::{Bias, Error, Result, Timeframe};

use crate::indicators::{FibonacciLevels, IndicatorSnapshot};

/// Stop-loss and first take-profit around the latest close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeLevels {
    pub stop_loss: f64,
    pub take_profit_1: f64,
}

impl TradeLevels {
    /// `stop_loss = close − mult·atr`, `take_profit_1 = close + (close − stop_loss)`.
    ///
    /// The levels are the same for every bias; a short alert carries a stop
    /// below the price and a target above it.
    pub fn from_close(close: f64, atr: f64, stop_atr_mult: f64) -> Self {
        let stop_loss = close - stop_atr_mult * atr;
        Self {
            stop_loss,
            take_profit_1: close + (close - stop_loss),
        }
    }
}

/// A rendered alert, ready for the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub timeframe: String,
    pub bias: Bias,
    pub levels: TradeLevels,
    text: String,
}

impl AlertMessage {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Static parts of the alert: symbol name, EMA spans for the labels and the
/// stop distance.
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    pub display_symbol: String,
    pub ema_fast_span: usize,
    pub ema_slow_span: usize,
    pub stop_atr_mult: f64,
}

impl AlertFormatter {
    /// Render the alert text. All prices and indicator values are shown with
    /// two decimals.
    pub fn render(
        &self,
        timeframe: &Timeframe,
        bias: Bias,
        snapshot: &IndicatorSnapshot,
        fib: &FibonacciLevels,
    ) -> Result<AlertMessage> {
        for (field, value) in [
            ("close", snapshot.close),
            ("ema_fast", snapshot.ema_fast),
            ("ema_slow", snapshot.ema_slow),
            ("rsi", snapshot.rsi),
            ("atr", snapshot.atr),
            ("level_0", fib.level_0),
            ("level_50", fib.level_50),
            ("level_100", fib.level_100),
        ] {
            if !value.is_finite() {
                return Err(Error::MalformedSnapshot(format!("{field} is {value}")));
            }
        }

        let levels = TradeLevels::from_close(snapshot.close, snapshot.atr, self.stop_atr_mult);
        let text = format!(
            "{symbol} analysis ({label})\n\
             {direction}\n\
             Price: {close:.2}\n\
             SL: {sl:.2} | TP1: {tp1:.2}\n\
             EMA{fast_span}: {ema_fast:.2} | EMA{slow_span}: {ema_slow:.2}\n\
             RSI: {rsi:.2}\n\
             Fibonacci 0%: {f0:.2} | 50%: {f50:.2} | 100%: {f100:.2}\n\
             #NotFinancialAdvice",
            symbol = self.display_symbol,
            label = timeframe.label,
            direction = direction_label(bias),
            close = snapshot.close,
            sl = levels.stop_loss,
            tp1 = levels.take_profit_1,
            fast_span = self.ema_fast_span,
            ema_fast = snapshot.ema_fast,
            slow_span = self.ema_slow_span,
            ema_slow = snapshot.ema_slow,
            rsi = snapshot.rsi,
            f0 = fib.level_0,
            f50 = fib.level_50,
            f100 = fib.level_100,
        );

        Ok(AlertMessage {
            timeframe: timeframe.interval.clone(),
            bias,
            levels,
            text,
        })
    }
}

pub fn direction_label(bias: Bias) -> &'static str {
    match bias {
        Bias::Long => "[BUY] Buy signal",
        Bias::Short => "[SELL] Sell signal",
        Bias::None => "[NONE] No signal",
    }
}
