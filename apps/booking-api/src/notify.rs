//! Notification dispatcher.
//!
//! Outbound email is strictly fire-and-forget: [`dispatch`] detaches the
//! send as a background task and logs failure. No operation ever blocks on
//! or fails from delivery.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use crate::config::AppConfig;

/// A rendered notification email.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub subject: String,
    pub html_body: String,
}

/// Notification delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid address: {0}")]
    BadAddress(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport verification failed: {0}")]
    Unverified(String),
}

/// Boxed future alias for dyn-compatible async trait methods.
type NotifyFuture<'a> = Pin<Box<dyn Future<Output = Result<(), NotifyError>> + Send + 'a>>;

/// Abstraction over the outbound notification channel.
pub trait Notifier: Send + Sync {
    /// Health-check the transport (called once at startup).
    fn verify(&self) -> NotifyFuture<'_>;

    /// Deliver one message to one recipient.
    fn send(&self, recipient: &str, message: EmailMessage) -> NotifyFuture<'_>;
}

/// Detach a send as a background task, logging failure.
///
/// The returned handle is for tests; production callers drop it.
pub fn dispatch(
    notifier: Arc<dyn Notifier>,
    recipient: String,
    message: EmailMessage,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        debug!(%recipient, subject = %message.subject, "Dispatching notification");
        if let Err(e) = notifier.send(&recipient, message).await {
            warn!(%recipient, error = %e, "Notification delivery failed");
        }
    })
}

// =============================================================================
// SMTP Notifier
// =============================================================================

/// SMTP-backed notifier using lettre's async transport.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build an SMTP notifier from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| NotifyError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::BadAddress(format!("{}: {e}", config.smtp_from)))?;

        Ok(SmtpNotifier { transport, from })
    }
}

impl Notifier for SmtpNotifier {
    fn verify(&self) -> NotifyFuture<'_> {
        Box::pin(async move {
            match self.transport.test_connection().await {
                Ok(true) => Ok(()),
                Ok(false) => Err(NotifyError::Unverified(
                    "SMTP server refused connection".to_string(),
                )),
                Err(e) => Err(NotifyError::Unverified(e.to_string())),
            }
        })
    }

    fn send(&self, recipient: &str, message: EmailMessage) -> NotifyFuture<'_> {
        let recipient = recipient.to_string();
        Box::pin(async move {
            let to = recipient
                .parse::<Mailbox>()
                .map_err(|e| NotifyError::BadAddress(format!("{recipient}: {e}")))?;

            let email = Message::builder()
                .from(self.from.clone())
                .to(to)
                .subject(&message.subject)
                .header(ContentType::TEXT_HTML)
                .body(message.html_body)
                .map_err(|e| NotifyError::Transport(format!("Message build failed: {e}")))?;

            self.transport
                .send(email)
                .await
                .map_err(|e| NotifyError::Transport(e.to_string()))?;

            Ok(())
        })
    }
}

// =============================================================================
// Recording Notifier
// =============================================================================

/// In-process notifier for tests: records every send instead of delivering.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<std::sync::Mutex<Vec<(String, EmailMessage)>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier that accepts and records every message.
    pub fn new() -> Self {
        RecordingNotifier::default()
    }

    /// A notifier whose every send fails (for fire-and-forget tests).
    pub fn failing() -> Self {
        RecordingNotifier {
            sent: Arc::default(),
            fail: true,
        }
    }

    /// Messages recorded so far, as `(recipient, message)` pairs.
    pub fn sent(&self) -> Vec<(String, EmailMessage)> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn verify(&self) -> NotifyFuture<'_> {
        Box::pin(async move { Ok(()) })
    }

    fn send(&self, recipient: &str, message: EmailMessage) -> NotifyFuture<'_> {
        let recipient = recipient.to_string();
        Box::pin(async move {
            if self.fail {
                return Err(NotifyError::Transport("simulated outage".to_string()));
            }
            self.sent
                .lock()
                .expect("notifier mutex poisoned")
                .push((recipient, message));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_records_delivery() {
        let notifier = Arc::new(RecordingNotifier::new());

        let handle = dispatch(
            notifier.clone(),
            "guest@example.com".to_string(),
            EmailMessage {
                subject: "Booking Confirmed".to_string(),
                html_body: "<p>See you soon</p>".to_string(),
            },
        );
        handle.await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "guest@example.com");
        assert_eq!(sent[0].1.subject, "Booking Confirmed");
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failure() {
        let notifier = Arc::new(RecordingNotifier::failing());

        // The detached task must complete without panicking
        let handle = dispatch(
            notifier.clone(),
            "guest@example.com".to_string(),
            EmailMessage {
                subject: "Booking Confirmed".to_string(),
                html_body: "<p>See you soon</p>".to_string(),
            },
        );
        handle.await.unwrap();

        assert!(notifier.sent().is_empty());
    }
}
