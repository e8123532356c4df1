//! User-visible notifications emitted by the data store.
//!
//! Every mutation ends in exactly one success or failure notification. The
//! receiving side decides how to show them.

use tokio::sync::mpsc;
use tracing::debug;

/// Outcome category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The operation went through
    Success,
    /// The operation failed and nothing changed
    Failure,
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Outcome
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// Longer human-readable text
    pub description: String,
}

/// Receiving end handed to the session owner.
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Sending end held by the store.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Creates a connected notifier and receiver.
    #[must_use]
    pub fn channel() -> (Self, NotificationReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn emit(&self, kind: NotificationKind, title: &str, description: String) {
        let notification = Notification {
            kind,
            title: title.to_string(),
            description,
        };
        if self.tx.send(notification).is_err() {
            debug!("Notification dropped, receiver is gone");
        }
    }

    /// Emits a success notification.
    pub fn success(&self, title: &str, description: impl Into<String>) {
        self.emit(NotificationKind::Success, title, description.into());
    }

    /// Emits a failure notification.
    pub fn failure(&self, title: &str, description: impl Into<String>) {
        self.emit(NotificationKind::Failure, title, description.into());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_notifications_arrive_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("Saved", "ok");
        notifier.failure("Broken", String::from("nope"));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.kind, NotificationKind::Success);
        assert_eq!(first.title, "Saved");
        let second = rx.try_recv().unwrap();
        assert_eq!(second.kind, NotificationKind::Failure);
        assert_eq!(second.description, "nope");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_receiver_is_ignored() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.success("Saved", "nobody listening");
    }
}
