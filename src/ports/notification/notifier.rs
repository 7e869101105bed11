use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::errors::NotifyResult;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Error,
}

/// A message for whoever watches the offload runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub subject: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn error(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            subject: subject.into(),
            body: body.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Side channel for failures. Delivery is fire-and-forget: callers log
/// errors and carry on.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, notification: &Notification) -> NotifyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_payload_shape() {
        let notification = Notification::error("log offload failed", "upload timed out");
        let payload = serde_json::to_value(&notification).unwrap();

        assert_eq!(payload["level"], "error");
        assert_eq!(payload["subject"], "log offload failed");
        assert_eq!(payload["body"], "upload timed out");
        assert!(payload["timestamp"].is_string());
    }
}
