//! Request orchestrator.
//!
//! Every API operation follows the same lifecycle:
//! 1. pending: the store is marked loading
//! 2. the request is awaited (no store borrow is held here)
//! 3. fulfilled: operation-specific effects are applied in one borrow
//! 4. rejected: the resolved message is recorded and, for chat-visible
//!    operations, appended to the conversation
//!
//! Operations that change the server-side quote finish by re-fetching it.
//! Fetches are ticketed, so a response that was overtaken by a newer
//! fetch or a local list change is dropped instead of clobbering the list.

use std::cell::RefCell;
use std::rc::Rc;

use quio_types::{
    QuoteError, Result,
    api::{ChatRequest, ExtractRequest},
    config::ClientConfig,
    event::{Operation, SessionEvent},
    message::{MessageKind, Sender},
    product::{MovelId, ProductItem},
    session::{ChatMode, SessionSnapshot},
};
use crate::event_bus::EventBus;
use crate::ports::QuoteApiPort;
use crate::store::SessionStore;

pub struct QuoteController {
    config: ClientConfig,
    store: Rc<RefCell<SessionStore>>,
    api: Rc<dyn QuoteApiPort>,
    event_bus: EventBus,
}

impl QuoteController {
    pub fn new(config: ClientConfig, api: Rc<dyn QuoteApiPort>, event_bus: EventBus) -> Self {
        Self::with_store(config, api, event_bus, SessionStore::new())
    }

    pub fn with_store(
        config: ClientConfig,
        api: Rc<dyn QuoteApiPort>,
        event_bus: EventBus,
        store: SessionStore,
    ) -> Self {
        log::info!(
            "Session {} started against {} ({})",
            store.session_id(),
            config.api_base,
            api.backend_name()
        );
        Self {
            config,
            store: Rc::new(RefCell::new(store)),
            api,
            event_bus,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.borrow().snapshot()
    }

    pub fn session_id(&self) -> String {
        self.store.borrow().session_id().to_string()
    }

    pub fn product_list(&self) -> Vec<ProductItem> {
        self.store.borrow().product_list().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.store.borrow().is_loading()
    }

    // ─── Synchronous commands ────────────────────────────────

    pub fn set_mode(&self, mode: ChatMode) {
        self.store.borrow_mut().set_mode(mode);
        self.event_bus.emit(SessionEvent::ModeChanged { mode });
    }

    pub fn add_message(&self, content: &str, sender: Sender, kind: MessageKind) -> String {
        self.store.borrow_mut().add_message(content, sender, kind)
    }

    pub fn clear_product_list(&self) {
        self.store.borrow_mut().clear_product_list();
        self.event_bus.emit(SessionEvent::ProductListCleared);
    }

    pub fn remove_product(&self, index: usize) -> Option<ProductItem> {
        self.store.borrow_mut().remove_product(index)
    }

    // ─── Compositions ────────────────────────────────────────

    /// Handle text typed by the user: echo it, then route it by mode.
    /// Blank input and input while a request is loading are ignored.
    pub async fn submit(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() || self.is_loading() {
            return Ok(());
        }

        let mode = {
            let mut store = self.store.borrow_mut();
            store.add_message(text, Sender::User, MessageKind::Text);
            store.mode()
        };

        match mode {
            ChatMode::Multiple => self.extract_products(text).await,
            ChatMode::Single => self.send_single_chat(text).await,
        }
    }

    /// Echo the chosen option as a user message and send it on.
    pub async fn select_chat_option(&self, label: &str) -> Result<()> {
        self.add_message(label, Sender::User, MessageKind::Text);
        self.send_single_chat(label).await
    }

    // ─── API operations ──────────────────────────────────────

    pub async fn send_single_chat(&self, message: &str) -> Result<()> {
        let op = Operation::SendSingleChat;
        self.start(op);

        let req = ChatRequest::single(message, self.session_id());
        match self.api.send_chat(&req).await {
            Ok(reply) => {
                let pdf_link = reply.pdf_path().map(|p| self.config.pdf_link(p));
                {
                    let mut store = self.store.borrow_mut();
                    store.succeed(op);
                    store.apply_chat_reply(reply, pdf_link);
                }
                self.event_bus.emit(SessionEvent::OperationSucceeded { operation: op });
                self.sync_quote().await;
                Ok(())
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    pub async fn extract_products(&self, message: &str) -> Result<()> {
        let op = Operation::ExtractProducts;
        self.start(op);

        let req = ExtractRequest {
            message: message.to_string(),
            session_id: self.session_id(),
        };
        match self.api.extract_products(&req).await {
            Ok(items) => {
                let outcome = {
                    let mut store = self.store.borrow_mut();
                    store.succeed(op);
                    store.apply_extraction(items)
                };
                log::debug!(
                    "Extraction merged: {} added, {} accumulated",
                    outcome.added,
                    outcome.merged
                );
                self.event_bus.emit(SessionEvent::ProductsMerged {
                    added: outcome.added,
                    merged: outcome.merged,
                });
                self.event_bus.emit(SessionEvent::OperationSucceeded { operation: op });
                Ok(())
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    /// Send the whole list for pricing. Ignored while the list is empty
    /// or another request is loading.
    pub async fn generate_multiple_quote(&self) -> Result<()> {
        let op = Operation::GenerateMultipleQuote;
        let (products, session_id) = {
            let store = self.store.borrow();
            if store.product_list().is_empty() || store.is_loading() {
                return Ok(());
            }
            (store.product_list().to_vec(), store.session_id().to_string())
        };
        self.start(op);

        let req = ChatRequest::generate_multiple_quote(session_id, products);
        match self.api.send_chat(&req).await {
            Ok(reply) => {
                let pdf_link = reply.pdf_path().map(|p| self.config.pdf_link(p));
                {
                    let mut store = self.store.borrow_mut();
                    store.succeed(op);
                    store.apply_generated_quote(reply, pdf_link);
                }
                self.event_bus.emit(SessionEvent::OperationSucceeded { operation: op });
                self.sync_quote().await;
                Ok(())
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    /// Replace the local list with the server's itemized quote.
    pub async fn refresh_quote(&self) -> Result<()> {
        let op = Operation::FetchQuote;
        let (ticket, session_id) = {
            let mut store = self.store.borrow_mut();
            (store.issue_quote_ticket(), store.session_id().to_string())
        };
        self.start(op);

        match self.api.fetch_quote(&session_id).await {
            Ok(snapshot) => {
                let applied = {
                    let mut store = self.store.borrow_mut();
                    let applied = store.apply_quote(ticket, snapshot);
                    if applied.is_some() {
                        store.succeed(op);
                    }
                    applied
                };
                match applied {
                    Some(items) => {
                        self.event_bus.emit(SessionEvent::QuoteReplaced { items });
                        self.event_bus.emit(SessionEvent::OperationSucceeded { operation: op });
                    }
                    None => {
                        log::debug!("Discarding stale quote fetch #{}", ticket.seq);
                        self.event_bus
                            .emit(SessionEvent::StaleQuoteDiscarded { seq: ticket.seq });
                    }
                }
                Ok(())
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    /// Delete one móvel server-side. The list is not touched until the
    /// follow-up fetch succeeds.
    pub async fn delete_movel(&self, movel_id: MovelId) -> Result<()> {
        let op = Operation::DeleteMovel;
        let (session_id, name) = {
            let store = self.store.borrow();
            let name = store
                .product_list()
                .iter()
                .find(|p| p.id == Some(movel_id))
                .map(|p| p.name.clone());
            (store.session_id().to_string(), name)
        };
        self.start(op);

        match self.api.remove_movel(&session_id, movel_id).await {
            Ok(()) => {
                self.store.borrow_mut().succeed(op);
                self.event_bus.emit(SessionEvent::OperationSucceeded { operation: op });
                self.sync_quote().await;
                self.narrate_removal(&session_id, movel_id, name.as_deref()).await;
                Ok(())
            }
            Err(e) => Err(self.reject(op, e)),
        }
    }

    // ─── Lifecycle helpers ───────────────────────────────────

    fn start(&self, op: Operation) {
        log::debug!("{} pending", op.name());
        self.store.borrow_mut().begin(op);
        self.event_bus.emit(SessionEvent::OperationStarted { operation: op });
    }

    fn reject(&self, op: Operation, err: QuoteError) -> QuoteError {
        let message = op.resolve_error(&err);
        log::warn!("{} rejected: {} ({})", op.name(), message, err);
        self.store.borrow_mut().fail(op, &message);
        self.event_bus.emit(SessionEvent::OperationFailed {
            operation: op,
            message,
        });
        err
    }

    /// Follow-up fetch after a mutating call. Its failure is already
    /// recorded by `refresh_quote` and does not fail the caller.
    async fn sync_quote(&self) {
        if self.refresh_quote().await.is_err() {
            log::debug!("Follow-up quote fetch failed; keeping current list");
        }
    }

    /// Tell the backend about a removal so the conversation stays in step
    /// with the quote. Best effort.
    async fn narrate_removal(&self, session_id: &str, movel_id: MovelId, name: Option<&str>) {
        let text = match name {
            Some(name) => format!("O item \"{}\" foi removido do orçamento.", name),
            None => format!("O item {} foi removido do orçamento.", movel_id),
        };
        let req = ChatRequest::single(text, session_id);
        match self.api.send_chat(&req).await {
            Ok(reply) if !reply.response.is_empty() => {
                let pdf_link = reply.pdf_path().map(|p| self.config.pdf_link(p));
                self.store.borrow_mut().apply_chat_reply(reply, pdf_link);
            }
            Ok(_) => {}
            Err(e) => log::warn!("Removal narration failed: {}", e),
        }
    }
}
