use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// One OHLCV bar from the candle source.
/// Sequences are ordered oldest first, with no duplicate timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time.
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Directional stance produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Long,
    Short,
    #[default]
    None,
}

impl Bias {
    /// Only `Long` and `Short` are worth an alert.
    pub fn is_actionable(self) -> bool {
        !matches!(self, Bias::None)
    }
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bias::Long => write!(f, "long"),
            Bias::Short => write!(f, "short"),
            Bias::None => write!(f, "none"),
        }
    }
}

impl FromStr for Bias {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "long" => Ok(Bias::Long),
            "short" => Ok(Bias::Short),
            "none" => Ok(Bias::None),
            other => Err(Error::Other(format!("unknown bias '{other}'"))),
        }
    }
}

/// A timeframe to evaluate.
///
/// `interval` is the exchange interval (`"4h"`) and doubles as the key in the
/// signal state store. `label` is what alerts show (`"4H"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub interval: String,
    pub label: String,
}

impl Timeframe {
    pub fn new(interval: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            label: label.into(),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.interval)
    }
}

/// Whether alerts go to the real channels or only to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Live,
    Dry,
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMode::Live => write!(f, "live"),
            DeliveryMode::Dry => write!(f, "dry"),
        }
    }
}
