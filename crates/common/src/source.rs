use async_trait::async_trait;

use crate::{Candle, Result};

/// Abstraction over wherever candles come from.
///
/// `BinanceClient` implements this against the public klines endpoint.
/// Tests plug in canned series.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch up to `limit` bars for `symbol` on `interval`, oldest first.
    ///
    /// An empty `Vec` is a valid answer and means "nothing to evaluate".
    async fn candles(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>>;
}
