use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

use common::{Error, Notifier, Result};

/// Posts alerts to a Discord channel webhook.
pub struct DiscordNotifier {
    webhook: Url,
    http: Client,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

impl DiscordNotifier {
    pub fn new(webhook_url: &str) -> Result<Self> {
        let webhook = Url::parse(webhook_url)
            .map_err(|e| Error::Config(format!("invalid Discord webhook URL: {e}")))?;
        if !matches!(webhook.scheme(), "https" | "http") {
            return Err(Error::Config(format!(
                "Discord webhook must be http(s), got '{}'",
                webhook.scheme()
            )));
        }
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { webhook, http })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &str {
        "discord"
    }

    async fn send(&self, message: &str) -> Result<()> {
        let resp = self
            .http
            .post(self.webhook.clone())
            .json(&WebhookPayload { content: message })
            .send()
            .await
            .map_err(|e| self.failure(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(self.rejection(status, &body));
        }
        Ok(())
    }
}

impl DiscordNotifier {
    fn failure(&self, reason: String) -> Error {
        Error::Dispatch {
            channel: self.name().to_string(),
            reason,
        }
    }

    fn rejection(&self, status: StatusCode, body: &str) -> Error {
        self.failure(format!("HTTP {status}: {body}"))
    }
}
