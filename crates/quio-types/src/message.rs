use serde::{Deserialize, Serialize};
use crate::session::generate_token;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// How the message body should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    /// `content` holds a reference to a recorded clip
    Audio,
}

/// A selectable follow-up offered by the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOption {
    pub id: String,
    pub label: String,
}

/// A single entry in the conversation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    /// ISO-8601, UTC
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<ChatOption>,
}

impl ChatMessage {
    /// Stamp a new message with a fresh id and the current time.
    pub fn new(content: impl Into<String>, sender: Sender, kind: MessageKind) -> Self {
        Self {
            id: generate_token(),
            content: content.into(),
            sender,
            timestamp: now_iso8601(),
            kind,
            options: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, MessageKind::Text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot, MessageKind::Text)
    }

    pub fn with_options(mut self, options: Vec<ChatOption>) -> Self {
        self.options = options;
        self
    }

    pub fn is_from_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
