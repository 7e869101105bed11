use thiserror::Error as ThisError;

/// Errors delivering a notification
#[derive(ThisError, Debug)]
pub enum NotifyError {
    #[error("Invalid notification target '{0}': expected an email address or http(s) URL")]
    InvalidTarget(String),

    #[error("Webhook delivery failed: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("Webhook returned status {status}")]
    WebhookStatus { status: u16 },

    #[error("Mail delivery failed: {0}")]
    Mail(String),
}

/// Result type for notification delivery
pub type NotifyResult<T> = Result<T, NotifyError>;
