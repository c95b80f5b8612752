//! Outbound notifications to account holders.
//!
//! Delivery itself (SMTP or anything else) happens outside this workspace;
//! the stores only depend on the [`Notifier`] trait.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::info;
use wallman_error::{catalog::CatalogError, CatalogResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> CatalogResult<()>;
}

/// Writes each notification to the log and hands it off to whatever tails it
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    sender: String,
}

impl TracingNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, notification: Notification) -> CatalogResult<()> {
        info!(
            from = %self.sender,
            to = %notification.recipient,
            subject = %notification.subject,
            body = %notification.body,
            "notification dispatched"
        );
        Ok(())
    }
}

/// In-memory outbox
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    outbox: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.outbox.lock().map(|outbox| outbox.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn send(&self, notification: Notification) -> CatalogResult<()> {
        self.outbox
            .lock()
            .map_err(|e| CatalogError::Notify(e.to_string()))?
            .push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_notifier_keeps_every_message() {
        let notifier = MemoryNotifier::new();
        let shared: Arc<dyn Notifier> = Arc::new(notifier.clone());

        shared
            .send(Notification::new("owner@uc.pt", "hello", "first"))
            .await
            .unwrap();
        shared
            .send(Notification::new("owner@uc.pt", "hello", "second"))
            .await
            .unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].body, "second");
    }

    #[tokio::test]
    async fn tracing_notifier_never_fails() {
        let notifier = TracingNotifier::new("wallman@uc.pt");
        assert!(notifier
            .send(Notification::new("owner@uc.pt", "subject", "body"))
            .await
            .is_ok());
    }
}
