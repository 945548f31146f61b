//! Transient user-facing notifications.
//!
//! Mutation failures land here instead of becoming application errors;
//! the host UI drains the queue and renders however it likes.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Retry,
    Dismiss,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub action: Option<NotificationAction>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            action: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// FIFO notification queue owned by each workbench.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.queue.push(notification);
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.queue
    }

    /// Hand the pending notifications to the renderer, emptying the queue.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let mut notifications = Notifications::default();
        notifications.push(Notification::new(NotificationLevel::Error, "Failed to move deal"));
        notifications.push(
            Notification::new(NotificationLevel::Error, "Failed to load pipeline data")
                .with_action(NotificationAction::Retry),
        );

        let drained = notifications.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].action, Some(NotificationAction::Retry));
        assert!(notifications.as_slice().is_empty());
    }
}
