//! Notification sinks: console log and incoming webhook.

use async_trait::async_trait;
use tracing::{info, warn};

use super::{NotificationSink, NotifyError};
use crate::config::defaults::WEBHOOK_HTTP_TIMEOUT_SECS;

/// Writes alerts to the log. The default when no channel is configured.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        for line in message.lines() {
            warn!("🌌 {}", line);
        }
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "log"
    }
}

/// Posts alerts as `{"text": "<message>"}` to an incoming-webhook URL
/// (Slack, Mattermost, Discord `/slack` endpoints, etc.).
#[derive(Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(WEBHOOK_HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({ "text": message });

        let resp = self.http.post(&self.url).json(&body).send().await?;

        if resp.status().is_success() {
            info!(lines = message.lines().count(), "Alert delivered to webhook");
            Ok(())
        } else {
            Err(NotifyError::Rejected(resp.status()))
        }
    }

    fn sink_name(&self) -> &str {
        "webhook"
    }
}
