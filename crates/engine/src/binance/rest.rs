use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::{Candle, CandleSource, Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Public-market REST client for Binance. Only the unauthenticated klines
/// endpoint is used, so no API key is needed.
pub struct BinanceClient {
    base_url: String,
    http: Client,
}

impl BinanceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl CandleSource for BinanceClient {
    async fn candles(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>> {
        let url = format!("{}/api/v3/klines", self.base_url);
        debug!(symbol, interval, limit, "Requesting klines from Binance");

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("symbol", symbol.to_string()),
                ("interval", interval.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        parse_klines(&check_status(status, body)?)
    }
}

// ─── Binance klines JSON parsing ─────────────────────────────────────────────

#[derive(Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

/// Pass a 2xx body through; map anything else to [`Error::Exchange`],
/// preferring Binance's `{code, msg}` error body when present.
fn check_status(status: StatusCode, body: String) -> Result<String> {
    if status.is_success() {
        return Ok(body);
    }
    let detail = serde_json::from_str::<ApiError>(&body)
        .map(|e| format!("code {}: {}", e.code, e.msg))
        .unwrap_or(body);
    Err(Error::Exchange(format!("HTTP {status}: {detail}")))
}

/// Parse a klines response body.
///
/// Each row is `[open_time_ms, "open", "high", "low", "close", "volume", ...]`;
/// trailing columns are ignored. Rows come back oldest first.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| parse_row(row).map_err(|e| Error::Exchange(format!("kline row {i}: {e}"))))
        .collect()
}

fn parse_row(row: &[Value]) -> std::result::Result<Candle, String> {
    if row.len() < 6 {
        return Err(format!("expected at least 6 columns, got {}", row.len()));
    }
    let open_ms = row[0].as_i64().ok_or("open time is not an integer")?;
    let timestamp = Utc
        .timestamp_millis_opt(open_ms)
        .single()
        .ok_or_else(|| format!("open time {open_ms} out of range"))?;

    Ok(Candle {
        timestamp,
        open: number(&row[1], "open")?,
        high: number(&row[2], "high")?,
        low: number(&row[3], "low")?,
        close: number(&row[4], "close")?,
        volume: number(&row[5], "volume")?,
    })
}

/// Binance quotes prices as strings; accept plain numbers too.
fn number(v: &Value, field: &str) -> std::result::Result<f64, String> {
    let parsed = match v {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|x| x.is_finite())
        .ok_or_else(|| format!("{field} is not numeric: {v}"))
}
