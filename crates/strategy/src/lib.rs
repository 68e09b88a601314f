pub mod alert;
pub mod classifier;
pub mod config;
pub mod indicators;

pub use alert::{AlertFormatter, AlertMessage, TradeLevels};
pub use classifier::classify;
pub use config::{StrategyParams, WatchlistConfig};
pub use indicators::{FibonacciLevels, IndicatorParams, IndicatorReport, IndicatorSnapshot};
