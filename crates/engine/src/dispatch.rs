use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use common::{Error, Notifier};

/// Outcome of one fan-out.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub delivered: Vec<String>,
    pub failed: Vec<Error>,
}

impl DispatchReport {
    pub fn all_failed(&self) -> bool {
        self.delivered.is_empty() && !self.failed.is_empty()
    }
}

/// Sends one alert to every configured channel.
///
/// Channels are attempted independently and concurrently; a failing channel
/// never prevents delivery on the others. Failures are logged and returned in
/// the report, never raised.
#[derive(Clone, Default)]
pub struct Dispatcher {
    channels: Vec<Arc<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Arc<dyn Notifier>>) -> Self {
        Self { channels }
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub async fn dispatch(&self, message: &str) -> DispatchReport {
        let attempts = self.channels.iter().map(|channel| async move {
            let result = channel.send(message).await;
            (channel.name().to_string(), result)
        });

        let mut report = DispatchReport::default();
        for (name, result) in join_all(attempts).await {
            match result {
                Ok(()) => {
                    info!(channel = %name, "Alert delivered");
                    report.delivered.push(name);
                }
                Err(e) => {
                    let e = match e {
                        e @ Error::Dispatch { .. } => e,
                        other => Error::Dispatch {
                            channel: name.clone(),
                            reason: other.to_string(),
                        },
                    };
                    warn!(channel = %name, error = %e, "Alert delivery failed");
                    report.failed.push(e);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recording {
        name: &'static str,
        fail: bool,
        sent: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new(name: &'static str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                fail,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Notifier for Recording {
        fn name(&self) -> &str {
            self.name
        }

        async fn send(&self, message: &str) -> common::Result<()> {
            self.sent.lock().unwrap().push(message.to_string());
            if self.fail {
                Err(Error::Http("503 Service Unavailable".into()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn every_channel_receives_the_message() {
        let a = Recording::new("a", false);
        let b = Recording::new("b", false);
        let channels: Vec<Arc<dyn Notifier>> = vec![a.clone(), b.clone()];
        let dispatcher = Dispatcher::new(channels);

        let report = dispatcher.dispatch("hello").await;

        assert_eq!(report.delivered, vec!["a", "b"]);
        assert!(report.failed.is_empty());
        assert_eq!(*a.sent.lock().unwrap(), vec!["hello"]);
        assert_eq!(*b.sent.lock().unwrap(), vec!["hello"]);
    }

    #[tokio::test]
    async fn failing_channel_does_not_block_others() {
        let broken = Recording::new("telegram", true);
        let ok = Recording::new("discord", false);
        let channels: Vec<Arc<dyn Notifier>> = vec![broken.clone(), ok.clone()];
        let dispatcher = Dispatcher::new(channels);

        let report = dispatcher.dispatch("alert").await;

        assert_eq!(report.delivered, vec!["discord"]);
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(
            &report.failed[0],
            Error::Dispatch { channel, .. } if channel == "telegram"
        ));
        assert_eq!(ok.sent.lock().unwrap().len(), 1);
        assert!(!report.all_failed());
    }

    #[tokio::test]
    async fn no_channels_is_an_empty_report() {
        let dispatcher = Dispatcher::default();
        let report = dispatcher.dispatch("nobody").await;
        assert!(dispatcher.is_empty());
        assert!(report.delivered.is_empty());
        assert!(!report.all_failed());
    }
}
