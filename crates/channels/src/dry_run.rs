use async_trait::async_trait;
use tracing::info;

use common::{Notifier, Result};

/// Writes alerts to the log instead of sending them. Used in dry-run mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, message: &str) -> Result<()> {
        info!(channel = "log", "Alert (dry run):\n{message}");
        Ok(())
    }
}
