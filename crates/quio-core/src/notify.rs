//! Global failure notifications.
//!
//! Every failed operation becomes a toast-style [`Notification`],
//! whichever operation it came from. Sinks decide how to show it.

use serde::{Deserialize, Serialize};
use quio_types::event::SessionEvent;

pub const NOTIFICATION_TITLE: &str = "Erro na Plataforma";
pub const UNEXPECTED_ERROR: &str = "Ocorreu um erro inesperado na operação.";
pub const NOTIFICATION_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub duration_ms: u32,
}

impl Notification {
    /// Notification for a failed operation, if `event` is one.
    pub fn from_event(event: &SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::OperationFailed { message, .. } => {
                let description = if message.trim().is_empty() {
                    UNEXPECTED_ERROR.to_string()
                } else {
                    message.clone()
                };
                Some(Self {
                    title: NOTIFICATION_TITLE.to_string(),
                    description,
                    duration_ms: NOTIFICATION_DURATION_MS,
                })
            }
            _ => None,
        }
    }
}

pub trait NotificationSink {
    fn notify(&self, notification: &Notification);
}

/// Sink that writes notifications to the log.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: &Notification) {
        log::error!("{}: {}", notification.title, notification.description);
    }
}

/// Forward every failure among `events` to `sink`. Returns how many were sent.
pub fn dispatch_notifications(events: &[SessionEvent], sink: &dyn NotificationSink) -> usize {
    let mut sent = 0;
    for notification in events.iter().filter_map(Notification::from_event) {
        sink.notify(&notification);
        sent += 1;
    }
    sent
}
