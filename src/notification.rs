//! Notification boundary
//!
//! The core only emits fire-and-forget requests; delivery belongs to whoever
//! implements `Notifier`. `LogNotifier` writes them to the log.

use parking_lot::Mutex;

/// Maximum characters of item text carried in a task-completed preview
const PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Success,
    Error,
    TaskCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// "Task Completed" with a short preview of the item text
    pub fn task_completed(item_text: &str) -> Self {
        Self {
            kind: NotificationKind::TaskCompleted,
            title: "Task Completed".to_string(),
            message: preview(item_text),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Send notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => {
                log::warn!("{}: {}", notification.title, notification.message)
            }
            _ => log::info!("{}: {}", notification.title, notification.message),
        }
    }
}

/// Keeps every notification it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.sent.lock().last().cloned()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.sent.lock().iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().push(notification);
    }
}

/// First 30 characters followed by "...". The ellipsis is always appended.
pub fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}
