use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// Non-2xx response. `message` is whatever the server put in its
    /// `{error, detail, message}` envelope, if anything.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A JavaScript callback threw or returned something unusable.
    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl QuoteError {
    /// The message the server supplied with a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            QuoteError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::Serialization(e.to_string())
    }
}
