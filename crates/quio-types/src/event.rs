use serde::{Deserialize, Serialize};
use crate::error::QuoteError;
use crate::session::ChatMode;

/// The asynchronous operations a session can run against the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SendSingleChat,
    ExtractProducts,
    GenerateMultipleQuote,
    FetchQuote,
    DeleteMovel,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SendSingleChat => "chat/sendSingleChat",
            Operation::ExtractProducts => "chat/extractProducts",
            Operation::GenerateMultipleQuote => "chat/generateMultipleQuote",
            Operation::FetchQuote => "chat/fetchQuote",
            Operation::DeleteMovel => "chat/deleteMovel",
        }
    }

    /// Used when the server rejects without a usable message.
    pub fn rejection_default(&self) -> &'static str {
        match self {
            Operation::SendSingleChat => "Falha ao processar a mensagem no modo único.",
            Operation::ExtractProducts => "Falha ao extrair produtos da mensagem.",
            Operation::GenerateMultipleQuote => "Falha ao gerar o orçamento final.",
            Operation::FetchQuote => "Falha ao carregar o orçamento.",
            Operation::DeleteMovel => "Falha ao remover o item.",
        }
    }

    /// Used when the failure never reached the server's error envelope
    /// (network failure, malformed JSON).
    pub fn fallback(&self) -> &'static str {
        match self {
            Operation::ExtractProducts => "Erro na extração de produtos.",
            Operation::GenerateMultipleQuote => "Erro ao gerar orçamento múltiplo.",
            _ => "Erro desconhecido.",
        }
    }

    /// Prefix of the bot message that reports a failure in the conversation.
    /// `None` means failures of this operation stay out of the chat.
    pub fn chat_error_prefix(&self) -> Option<&'static str> {
        match self {
            Operation::SendSingleChat | Operation::GenerateMultipleQuote => Some("❌ Erro: "),
            Operation::ExtractProducts => Some("⚠️ Erro na extração: "),
            Operation::FetchQuote | Operation::DeleteMovel => None,
        }
    }

    /// Whether this operation drives the session's request status.
    /// The quote fetch is a background sync and leaves it alone.
    pub fn tracks_status(&self) -> bool {
        !matches!(self, Operation::FetchQuote)
    }

    pub fn resolve_error(&self, err: &QuoteError) -> String {
        match err.server_message().filter(|m| !m.trim().is_empty()) {
            Some(m) => m.to_string(),
            None if matches!(err, QuoteError::Api { .. }) => self.rejection_default().to_string(),
            None => self.fallback().to_string(),
        }
    }
}

/// Events emitted by the session controller.
/// Consumers drain them from the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    OperationStarted { operation: Operation },
    OperationSucceeded { operation: Operation },
    OperationFailed { operation: Operation, message: String },
    /// Extraction result folded into the list
    ProductsMerged { added: usize, merged: usize },
    /// Authoritative list from the server replaced the local one
    QuoteReplaced { items: usize },
    /// A quote fetch settled after a newer one was issued or the list changed
    StaleQuoteDiscarded { seq: u64 },
    ModeChanged { mode: ChatMode },
    ProductListCleared,
}
