use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Candle data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Malformed indicator snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Dispatch to {channel} failed: {reason}")]
    Dispatch { channel: String, reason: String },

    #[error("Signal store corrupt: {0}")]
    StoreCorruption(String),

    #[error("Exchange API error: {0}")]
    Exchange(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
