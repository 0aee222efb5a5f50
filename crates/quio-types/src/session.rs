use serde::{Deserialize, Serialize};
use crate::message::ChatMessage;
use crate::money;
use crate::product::ProductItem;

/// Interaction style of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Conversational Q&A about one product
    #[default]
    Single,
    /// Batch extraction of items into a list
    Multiple,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Single => "single",
            ChatMode::Multiple => "multiple",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(ChatMode::Single),
            "multiple" => Some(ChatMode::Multiple),
            _ => None,
        }
    }
}

/// Lifecycle of the most recent request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Server-side totals from the last applied quote fetch
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub total: f64,
    pub finalized: bool,
}

/// Read-only snapshot of a chat session, handed to whatever renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub mode: ChatMode,
    pub status: RequestStatus,
    pub error: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub product_list: Vec<ProductItem>,
    pub pdf_url: Option<String>,
    pub quote: Option<QuoteSummary>,
    /// Σ price × quantity over `product_list`
    pub total: f64,
    pub total_display: String,
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    pub fn fill_totals(mut self) -> Self {
        self.total = money::list_total(&self.product_list);
        self.total_display = money::format_brl(self.total);
        self
    }
}

/// Opaque client-side token: `session_<millis>_<9 chars>`.
/// Also used for message ids.
pub fn generate_token() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", millis, &suffix[..9])
}
