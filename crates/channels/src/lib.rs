pub mod discord;
pub mod dry_run;
pub mod telegram;

pub use discord::DiscordNotifier;
pub use dry_run::LogNotifier;
pub use telegram::TelegramNotifier;

use std::sync::Arc;

use tracing::{info, warn};

use common::{Config, DeliveryMode, Notifier, Result};

/// Build the channel list for the configured delivery mode.
///
/// Live mode gets Telegram (mandatory) and Discord (when a webhook is set).
/// Dry mode only logs alerts.
pub fn from_config(cfg: &Config) -> Result<Vec<Arc<dyn Notifier>>> {
    let mut channels: Vec<Arc<dyn Notifier>> = Vec::new();

    match cfg.delivery_mode {
        DeliveryMode::Dry => {
            info!("Dry-run delivery - alerts are only logged");
            channels.push(Arc::new(LogNotifier));
        }
        DeliveryMode::Live => {
            if let Some(token) = &cfg.telegram_token {
                channels.push(Arc::new(TelegramNotifier::new(
                    token.clone(),
                    cfg.telegram_chat_ids.clone(),
                )?));
            }
            match &cfg.discord_webhook_url {
                Some(url) => channels.push(Arc::new(DiscordNotifier::new(url)?)),
                None => warn!("DISCORD_WEBHOOK_URL not set - Discord channel disabled"),
            }
        }
    }

    Ok(channels)
}
