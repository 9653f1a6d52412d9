//! New-submission notifications
//!
//! Delivery is best effort: callers log a failed send and carry on.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use showcase_core::models::Submission;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned status {0}")]
    Status(u16),
}

/// Message sent to the site owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn for_submission(recipient: &str, submission: &Submission) -> Self {
        Self {
            to: recipient.to_owned(),
            subject: format!("New Contact Form Submission: {}", submission.subject),
            body: format!(
                "New contact form submission:\n\n\
                 Name: {}\n\
                 Email: {}\n\
                 Subject: {}\n\
                 Message: {}\n\n\
                 Submitted at: {}",
                submission.name,
                submission.email,
                submission.subject,
                submission.message,
                submission.created_at.to_rfc3339(),
            ),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "notification"
        );
        tracing::debug!(body = %notification.body, "notification body");
        Ok(())
    }
}

/// POSTs notifications as JSON to a webhook
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        tracing::debug!(url = %self.url, "webhook notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn submission() -> Submission {
        Submission {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Pricing".into(),
            message: "How much?".into(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn notification_lists_fields() {
        let n = Notification::for_submission("owner@example.com", &submission());
        assert_eq!(n.to, "owner@example.com");
        assert_eq!(n.subject, "New Contact Form Submission: Pricing");
        assert!(n.body.contains("Name: Ada"));
        assert!(n.body.contains("Email: ada@example.com"));
        assert!(n.body.contains("Message: How much?"));
        assert!(n.body.contains("Submitted at: 2024-05-01T12:00:00+00:00"));
    }

    #[tokio::test]
    async fn log_notifier_never_fails() {
        let n = Notification::for_submission("x@example.com", &submission());
        assert!(LogNotifier.send(&n).await.is_ok());
    }

    #[tokio::test]
    async fn webhook_to_closed_port_is_an_error() {
        // port 9 (discard) is not expected to be listening locally
        let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook").unwrap();
        let n = Notification::for_submission("x@example.com", &submission());
        assert!(notifier.send(&n).await.is_err());
    }
}
