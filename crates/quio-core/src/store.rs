//! Session store, the single source of truth for one chat session.
//!
//! Every mutation is a plain `&mut self` method, so a caller never sees
//! a half-applied update. The controller wraps the store in a `RefCell`
//! and never holds the borrow across an `.await`.

use quio_types::{
    api::{ChatReply, QuoteSnapshot},
    event::Operation,
    message::{ChatMessage, MessageKind, Sender},
    money,
    product::ProductItem,
    session::{generate_token, ChatMode, QuoteSummary, RequestStatus, SessionSnapshot},
};
use crate::reconcile::{merge_products, MergeOutcome};

pub const LIST_CLEARED_NOTICE: &str = "Lista de itens limpa.";
pub const NO_PRODUCTS_NOTICE: &str = "❌ Não consegui identificar produtos. Tente ser mais específico.";

/// Issued when a quote fetch starts. The fetched list is applied only if
/// the ticket is still current when the response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteTicket {
    pub seq: u64,
    revision: u64,
}

pub struct SessionStore {
    session_id: String,
    mode: ChatMode,
    status: RequestStatus,
    error: Option<String>,
    messages: Vec<ChatMessage>,
    product_list: Vec<ProductItem>,
    pdf_url: Option<String>,
    quote: Option<QuoteSummary>,
    /// Last quote ticket handed out
    quote_seq: u64,
    /// Bumped on every change to `product_list`
    list_revision: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_session_id(generate_token())
    }

    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            mode: ChatMode::default(),
            status: RequestStatus::Idle,
            error: None,
            messages: Vec::new(),
            product_list: Vec::new(),
            pdf_url: None,
            quote: None,
            quote_seq: 0,
            list_revision: 0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn product_list(&self) -> &[ProductItem] {
        &self.product_list
    }

    pub fn pdf_url(&self) -> Option<&str> {
        self.pdf_url.as_deref()
    }

    pub fn quote(&self) -> Option<QuoteSummary> {
        self.quote
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Σ price × quantity, computed on demand.
    pub fn total(&self) -> f64 {
        money::list_total(&self.product_list)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            mode: self.mode,
            status: self.status,
            error: self.error.clone(),
            messages: self.messages.clone(),
            product_list: self.product_list.clone(),
            pdf_url: self.pdf_url.clone(),
            quote: self.quote,
            total: 0.0,
            total_display: String::new(),
        }
        .fill_totals()
    }

    // ─── Synchronous reducers ────────────────────────────────

    /// Switch mode. Conversation, list, PDF and session id are kept.
    pub fn set_mode(&mut self, mode: ChatMode) {
        self.mode = mode;
        self.error = None;
    }

    /// Append a message and return its id.
    pub fn add_message(&mut self, content: impl Into<String>, sender: Sender, kind: MessageKind) -> String {
        let message = ChatMessage::new(content, sender, kind);
        let id = message.id.clone();
        self.messages.push(message);
        self.error = None;
        id
    }

    pub fn clear_product_list(&mut self) {
        self.product_list.clear();
        self.list_revision += 1;
        self.pdf_url = None;
        self.messages.push(ChatMessage::bot(LIST_CLEARED_NOTICE));
    }

    /// Remove the row at `index`. Out-of-range indexes are ignored.
    pub fn remove_product(&mut self, index: usize) -> Option<ProductItem> {
        if index >= self.product_list.len() {
            return None;
        }
        self.list_revision += 1;
        Some(self.product_list.remove(index))
    }

    // ─── Request lifecycle ───────────────────────────────────

    /// Pending: mark loading and clear the last error. Extraction also
    /// drops any PDF link, since the list is about to change.
    pub fn begin(&mut self, op: Operation) {
        if op.tracks_status() {
            self.status = RequestStatus::Loading;
            self.error = None;
        }
        if op == Operation::ExtractProducts {
            self.pdf_url = None;
        }
    }

    /// Fulfilled: operation-specific effects are applied separately.
    pub fn succeed(&mut self, op: Operation) {
        if op.tracks_status() {
            self.status = RequestStatus::Succeeded;
        }
    }

    /// Rejected: record the message and, for chat-visible operations,
    /// report it in the conversation.
    pub fn fail(&mut self, op: Operation, message: &str) {
        if op.tracks_status() {
            self.status = RequestStatus::Failed;
        }
        self.error = Some(message.to_string());
        if let Some(prefix) = op.chat_error_prefix() {
            self.messages.push(ChatMessage::bot(format!("{}{}", prefix, message)));
        }
    }

    // ─── Fulfilled effects ───────────────────────────────────

    /// Append the bot's reply; remember the PDF link when one is ready.
    pub fn apply_chat_reply(&mut self, reply: ChatReply, pdf_link: Option<String>) {
        self.messages
            .push(ChatMessage::bot(reply.response).with_options(reply.options));
        if pdf_link.is_some() {
            self.pdf_url = pdf_link;
        }
    }

    /// Fold extracted items into the list and report the result in the chat.
    pub fn apply_extraction(&mut self, items: Vec<ProductItem>) -> MergeOutcome {
        let count = items.len();
        let outcome = merge_products(&mut self.product_list, items);
        if count > 0 {
            self.list_revision += 1;
            self.messages.push(ChatMessage::bot(format!(
                "✅ {} item(ns) encontrado(s) e adicionado(s) à lista.",
                count
            )));
        } else {
            self.messages.push(ChatMessage::bot(NO_PRODUCTS_NOTICE));
        }
        outcome
    }

    /// The list was sent off for pricing and is considered consumed.
    pub fn apply_generated_quote(&mut self, reply: ChatReply, pdf_link: Option<String>) {
        self.apply_chat_reply(reply, pdf_link);
        self.product_list.clear();
        self.list_revision += 1;
    }

    // ─── Quote synchronization ───────────────────────────────

    pub fn issue_quote_ticket(&mut self) -> QuoteTicket {
        self.quote_seq += 1;
        QuoteTicket {
            seq: self.quote_seq,
            revision: self.list_revision,
        }
    }

    pub fn is_current(&self, ticket: QuoteTicket) -> bool {
        ticket.seq == self.quote_seq && ticket.revision == self.list_revision
    }

    /// Replace the list with the server's. Returns the new length, or
    /// `None` if the ticket went stale and nothing was applied.
    pub fn apply_quote(&mut self, ticket: QuoteTicket, snapshot: QuoteSnapshot) -> Option<usize> {
        if !self.is_current(ticket) {
            return None;
        }
        self.quote = Some(QuoteSummary {
            total: snapshot.total,
            finalized: snapshot.finalizado,
        });
        self.product_list = snapshot.into_products();
        self.list_revision += 1;
        Some(self.product_list.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
