//! Rising-edge alerting
//!
//! [`ChangeNotifier`] compares each cycle's scores with the previous cycle's
//! and composes an alert for every field that went up. A
//! [`NotificationSink`] delivers non-empty alerts.

mod change;
mod sinks;

pub use change::{evaluate, ChangeNotifier};
pub use sinks::{LogNotifier, WebhookNotifier};

use async_trait::async_trait;
use thiserror::Error;

/// Notification collaborator errors. Never fatal to the poll loop.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification sink unavailable: {0}")]
    NotifySinkUnavailable(String),

    #[error("Notification rejected with status {0}")]
    Rejected(reqwest::StatusCode),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::NotifySinkUnavailable(err.to_string())
    }
}

/// Delivers an alert message somewhere a person will see it.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), NotifyError>;

    /// Human-readable name for logging.
    fn sink_name(&self) -> &str;
}
