//! String forms accepted from JavaScript.

use quio_types::message::{MessageKind, Sender};
use quio_types::session::ChatMode;

pub fn parse_mode(value: &str) -> Option<ChatMode> {
    ChatMode::parse(value.trim().to_ascii_lowercase().as_str())
}

pub fn parse_sender(value: &str) -> Option<Sender> {
    match value.trim().to_ascii_lowercase().as_str() {
        "user" => Some(Sender::User),
        "bot" => Some(Sender::Bot),
        _ => None,
    }
}

/// Missing or empty kind means text.
pub fn parse_kind(value: Option<&str>) -> Option<MessageKind> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("text") => Some(MessageKind::Text),
        Some("audio") => Some(MessageKind::Audio),
        _ => None,
    }
}
