mod mail_notifier;
mod webhook_notifier;

pub use mail_notifier::MailNotifier;
pub use webhook_notifier::WebhookNotifier;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    domain::errors::{NotifyError, NotifyResult},
    ports::notification::{Notification, Notifier},
};

/// Where failure notifications go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    Email(String),
    Webhook(String),
}

impl NotificationTarget {
    pub fn parse(target: &str) -> NotifyResult<Self> {
        let target = target.trim();

        if target.starts_with("http://") || target.starts_with("https://") {
            return Ok(Self::Webhook(target.to_string()));
        }

        match target.split_once('@') {
            Some((user, domain))
                if !user.is_empty()
                    && !domain.is_empty()
                    && !target.chars().any(char::is_whitespace) =>
            {
                Ok(Self::Email(target.to_string()))
            }
            _ => Err(NotifyError::InvalidTarget(target.to_string())),
        }
    }

    /// Build the notifier delivering to this target
    pub fn into_notifier(self) -> Arc<dyn Notifier> {
        match self {
            Self::Email(address) => Arc::new(MailNotifier::new(address)),
            Self::Webhook(url) => Arc::new(WebhookNotifier::new(url)),
        }
    }
}

impl FromStr for NotificationTarget {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(address) => write!(f, "mailto:{}", address),
            Self::Webhook(url) => f.write_str(url),
        }
    }
}

/// Notifier used when no target is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, notification: &Notification) -> NotifyResult<()> {
        tracing::trace!(subject = %notification.subject, "no notification target configured");
        Ok(())
    }
}
