use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{
    domain::errors::{NotifyError, NotifyResult},
    ports::notification::{Notification, Notifier},
};

/// Hands notifications to the local `mail` command
pub struct MailNotifier {
    program: String,
    recipient: String,
}

impl MailNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self::with_program("mail", recipient)
    }

    /// Use a different mailer binary with the same `-s subject recipient` interface
    pub fn with_program(program: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn notify(&self, notification: &Notification) -> NotifyResult<()> {
        let mut child = Command::new(&self.program)
            .arg("-s")
            .arg(&notification.subject)
            .arg(&self.recipient)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NotifyError::Mail(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(notification.body.as_bytes())
                .await
                .map_err(|e| NotifyError::Mail(e.to_string()))?;
            // Dropping stdin closes the pipe so the mailer sees end of message
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| NotifyError::Mail(e.to_string()))?;

        if !output.status.success() {
            return Err(NotifyError::Mail(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_mailer_is_an_error() {
        let notifier = MailNotifier::with_program("/nonexistent/mailer", "ops@example.com");
        let result = notifier
            .notify(&Notification::error("subject", "body"))
            .await;
        assert!(matches!(result, Err(NotifyError::Mail(_))));
    }

    #[tokio::test]
    async fn test_failing_mailer_is_an_error() {
        let notifier = MailNotifier::with_program("false", "ops@example.com");
        let result = notifier
            .notify(&Notification::error("subject", "body"))
            .await;
        assert!(matches!(result, Err(NotifyError::Mail(_))));
    }
}
