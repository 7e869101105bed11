use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::{
    domain::errors::{NotifyError, NotifyResult},
    ports::notification::{Notification, Notifier},
};

/// Posts notifications as JSON to an HTTP endpoint
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> NotifyResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::WebhookStatus {
                status: status.as_u16(),
            });
        }

        debug!(url = %self.url, subject = %notification.subject, "webhook notification delivered");
        Ok(())
    }
}
