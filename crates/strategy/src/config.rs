use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use common::{Error, Result, Timeframe};

use crate::alert::AlertFormatter;
use crate::indicators::IndicatorParams;

/// Watchlist file (TOML). Every field has a default, so an empty file is the
/// built-in watchlist.
///
/// Example `config/watchlist.toml`:
/// ```toml
/// symbol = "ETHUSDT"
/// display_symbol = "ETH/USDT"
/// candle_limit = 500
///
/// [[timeframe]]
/// interval = "4h"
/// label = "4H"
///
/// [[timeframe]]
/// interval = "1d"
/// label = "1D"
///
/// [params]
/// ema_fast = 50
/// ema_slow = 200
/// stop_atr_mult = 1.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchlistConfig {
    /// Exchange symbol, e.g. "ETHUSDT".
    pub symbol: String,
    /// Name shown in alert headers, e.g. "ETH/USDT".
    pub display_symbol: String,
    /// Bars requested per timeframe.
    pub candle_limit: u32,
    #[serde(rename = "timeframe")]
    pub timeframes: Vec<Timeframe>,
    pub params: StrategyParams,
}

/// Indicator lookbacks plus the stop distance used in alerts.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyParams {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub fib_window: usize,
    /// Stop-loss distance in ATR multiples.
    pub stop_atr_mult: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        let ind = IndicatorParams::default();
        Self {
            ema_fast: ind.ema_fast,
            ema_slow: ind.ema_slow,
            rsi_period: ind.rsi_period,
            atr_period: ind.atr_period,
            fib_window: ind.fib_window,
            stop_atr_mult: 1.5,
        }
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            symbol: "ETHUSDT".to_string(),
            display_symbol: "ETH/USDT".to_string(),
            candle_limit: 500,
            timeframes: vec![Timeframe::new("4h", "4H"), Timeframe::new("1d", "1D")],
            params: StrategyParams::default(),
        }
    }
}

impl WatchlistConfig {
    /// Load and validate a watchlist from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read watchlist at '{path}': {e}")))?;
        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("invalid watchlist at '{path}': {e}")))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Config("symbol must not be empty".into()));
        }
        if self.timeframes.is_empty() {
            return Err(Error::Config("at least one [[timeframe]] is required".into()));
        }
        let mut seen = HashSet::new();
        for tf in &self.timeframes {
            // The interval is the state-store key; ':' would break the line format.
            if tf.interval.is_empty() || tf.interval.contains(':') || tf.interval.contains('\n') {
                return Err(Error::Config(format!("invalid timeframe interval '{}'", tf.interval)));
            }
            if !seen.insert(tf.interval.as_str()) {
                return Err(Error::Config(format!("duplicate timeframe '{}'", tf.interval)));
            }
        }
        let p = &self.params;
        if [p.ema_fast, p.ema_slow, p.rsi_period, p.atr_period, p.fib_window].contains(&0) {
            return Err(Error::Config("indicator periods must be positive".into()));
        }
        if p.ema_fast >= p.ema_slow {
            return Err(Error::Config(format!(
                "ema_fast ({}) must be shorter than ema_slow ({})",
                p.ema_fast, p.ema_slow
            )));
        }
        if !(p.stop_atr_mult.is_finite() && p.stop_atr_mult > 0.0) {
            return Err(Error::Config("stop_atr_mult must be a positive number".into()));
        }
        Ok(())
    }

    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            ema_fast: self.params.ema_fast,
            ema_slow: self.params.ema_slow,
            rsi_period: self.params.rsi_period,
            atr_period: self.params.atr_period,
            fib_window: self.params.fib_window,
        }
    }

    pub fn alert_formatter(&self) -> AlertFormatter {
        AlertFormatter {
            display_symbol: self.display_symbol.clone(),
            ema_fast_span: self.params.ema_fast,
            ema_slow_span: self.params.ema_slow,
            stop_atr_mult: self.params.stop_atr_mult,
        }
    }
}
