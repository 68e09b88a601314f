use async_trait::async_trait;

use crate::Result;

/// A single notification channel (Telegram, Discord webhook, log sink).
///
/// Delivery is fire-and-forget from the pipeline's point of view: the result
/// is only logged and never influences classification or persistence.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short channel name used in logs, e.g. `"telegram"`.
    fn name(&self) -> &str;

    /// Deliver one rendered alert.
    async fn send(&self, message: &str) -> Result<()>;
}
