//! User-facing notification channel
//!
//! Sessions report uploads, rejections, and answers as short toast-style
//! notices. Delivery is advisory: a full or closed channel drops the notice.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Success => write!(f, "OK"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single toast notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn content_processed() -> Self {
        Self::new(
            "Content processed successfully",
            "Your textbook content is ready for question answering.",
            Severity::Success,
        )
    }

    pub fn file_uploaded() -> Self {
        Self::new(
            "File uploaded successfully",
            "Your textbook content is ready for processing.",
            Severity::Success,
        )
    }

    pub fn invalid_file_type() -> Self {
        Self::new(
            "Invalid file type",
            "Please upload a .txt file or paste text directly.",
            Severity::Error,
        )
    }

    pub fn no_content_provided() -> Self {
        Self::new(
            "No content provided",
            "Please upload a file or paste some textbook content.",
            Severity::Error,
        )
    }

    pub fn no_content_available() -> Self {
        Self::new(
            "No content available",
            "Please upload textbook content first.",
            Severity::Error,
        )
    }

    pub fn busy() -> Self {
        Self::new(
            "Still processing",
            "Please wait for the current question to finish.",
            Severity::Error,
        )
    }

    pub fn question_answered(confidence: f64) -> Self {
        Self::new(
            "Question answered",
            format!(
                "Answer generated with {}% confidence.",
                confidence_percent(confidence)
            ),
            Severity::Success,
        )
    }

    pub fn processing_failed() -> Self {
        Self::new(
            "Error processing question",
            "There was an error generating the answer. Please try again.",
            Severity::Error,
        )
    }
}

/// Confidence as a rounded whole percentage
pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Sink for session notices
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Notifier that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _notification: Notification) {}
}

/// Bounded channel carrying notices to a front end
///
/// Channel capacity: 100 notices
#[derive(Clone)]
pub struct NotificationBus {
    sender: mpsc::Sender<Notification>,
}

impl NotificationBus {
    /// Create new bus and its receiving end
    pub fn new() -> (Self, mpsc::Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel(100);
        (NotificationBus { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for NotificationBus {
    async fn notify(&self, notification: Notification) {
        // Non-blocking: a full or closed channel drops the notice
        let _ = self.sender.try_send(notification);
    }
}

/// Drain everything currently queued on a receiver
pub fn drain(receiver: &mut mpsc::Receiver<Notification>) -> Vec<Notification> {
    let mut pending = Vec::new();
    while let Ok(notification) = receiver.try_recv() {
        pending.push(notification);
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_bus_delivers() {
        let (bus, mut receiver) = NotificationBus::new();
        bus.notify(Notification::content_processed()).await;

        let notice = timeout(Duration::from_millis(100), receiver.recv())
            .await
            .expect("Timeout waiting for notice")
            .expect("Channel closed");
        assert_eq!(notice.title, "Content processed successfully");
        assert_eq!(notice.severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_bus_clone_shares_channel() {
        let (bus1, mut receiver) = NotificationBus::new();
        let bus2 = bus1.clone();

        bus1.notify(Notification::file_uploaded()).await;
        bus2.notify(Notification::invalid_file_type()).await;

        assert_eq!(drain(&mut receiver).len(), 2);
    }

    #[tokio::test]
    async fn test_full_channel_drops_instead_of_blocking() {
        let (bus, mut receiver) = NotificationBus::new();
        for _ in 0..150 {
            bus.notify(Notification::busy()).await;
        }
        assert_eq!(drain(&mut receiver).len(), 100);
    }

    #[tokio::test]
    async fn test_closed_channel_is_ignored() {
        let (bus, receiver) = NotificationBus::new();
        drop(receiver);
        bus.notify(Notification::processing_failed()).await;
    }

    #[test]
    fn test_question_answered_percentage() {
        let notice = Notification::question_answered(0.75);
        assert_eq!(notice.description, "Answer generated with 75% confidence.");

        let notice = Notification::question_answered(0.4 + 0.1 * 3.0);
        assert_eq!(notice.description, "Answer generated with 70% confidence.");
    }

    #[test]
    fn test_confidence_percent_rounds() {
        assert_eq!(confidence_percent(0.1), 10);
        assert_eq!(confidence_percent(0.846), 85);
        assert_eq!(confidence_percent(0.844), 84);
        assert_eq!(confidence_percent(1.0), 100);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(Severity::Success.to_string(), "OK");
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }
}
