use crate::DeliveryMode;

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Delivery
    pub delivery_mode: DeliveryMode,

    // Telegram
    pub telegram_token: Option<String>,
    pub telegram_chat_ids: Vec<i64>,

    // Discord
    pub discord_webhook_url: Option<String>,

    // Candle source
    pub binance_base_url: String,

    // Signal state store file
    pub signal_state_path: String,

    // Watchlist TOML path; `None` uses the built-in watchlist
    pub watchlist_path: Option<String>,

    // Weekend gate
    pub gate_timezone: String,
    pub skip_weekends: bool,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let delivery_mode = match optional_env("ALERT_MODE")
            .unwrap_or_else(|| "live".to_string())
            .to_lowercase()
            .as_str()
        {
            "live" => DeliveryMode::Live,
            "dry" => DeliveryMode::Dry,
            other => panic!("ERROR: ALERT_MODE must be 'live' or 'dry', got: '{other}'"),
        };

        // Telegram credentials are only mandatory when alerts are really sent.
        let (telegram_token, telegram_chat_ids) = match delivery_mode {
            DeliveryMode::Live => (
                Some(required_env("TELEGRAM_TOKEN")),
                parse_chat_ids(&required_env("TELEGRAM_CHAT_ID")),
            ),
            DeliveryMode::Dry => (
                optional_env("TELEGRAM_TOKEN"),
                optional_env("TELEGRAM_CHAT_ID")
                    .map(|v| parse_chat_ids(&v))
                    .unwrap_or_default(),
            ),
        };

        Config {
            delivery_mode,
            telegram_token,
            telegram_chat_ids,
            discord_webhook_url: optional_env("DISCORD_WEBHOOK_URL").filter(|v| !v.is_empty()),
            binance_base_url: optional_env("BINANCE_BASE_URL")
                .unwrap_or_else(|| "https://api.binance.com".to_string()),
            signal_state_path: optional_env("SIGNAL_STATE_PATH")
                .unwrap_or_else(|| "last_signal.txt".to_string()),
            watchlist_path: optional_env("WATCHLIST_PATH"),
            gate_timezone: optional_env("GATE_TIMEZONE")
                .unwrap_or_else(|| "Europe/Vilnius".to_string()),
            skip_weekends: optional_env("SKIP_WEEKENDS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }
}

fn parse_chat_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim().parse::<i64>().unwrap_or_else(|_| {
                panic!("TELEGRAM_CHAT_ID contains non-numeric ID: '{}'", s.trim())
            })
        })
        .collect()
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
