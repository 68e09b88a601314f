use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::warn;

use common::{Error, Notifier, Result};

/// Sends alerts through a Telegram bot to a fixed list of chats.
pub struct TelegramNotifier {
    bot: Bot,
    chat_ids: Vec<ChatId>,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_ids: Vec<i64>) -> Result<Self> {
        if chat_ids.is_empty() {
            return Err(Error::Config("Telegram needs at least one chat id".into()));
        }
        Ok(Self {
            bot: Bot::new(token),
            chat_ids: chat_ids.into_iter().map(ChatId).collect(),
        })
    }

    pub fn chat_ids(&self) -> &[ChatId] {
        &self.chat_ids
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    /// Sends to every chat; succeeds only if every chat accepted the message.
    async fn send(&self, message: &str) -> Result<()> {
        let mut failures = Vec::new();
        for &chat_id in &self.chat_ids {
            if let Err(e) = self.bot.send_message(chat_id, message).await {
                warn!(chat_id = ?chat_id, error = %e, "Failed to send Telegram alert");
                failures.push(format!("chat {}: {e}", chat_id.0));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Dispatch {
                channel: self.name().to_string(),
                reason: failures.join("; "),
            })
        }
    }
}
