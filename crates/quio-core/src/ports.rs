//! Port traits at the hexagonal architecture boundary.
//!
//! The quoting API is reached only through [`QuoteApiPort`]. The browser
//! implementation lives in `quio-platform`; tests supply in-memory mocks.

use async_trait::async_trait;
use quio_types::{
    Result,
    api::{ChatReply, ChatRequest, ExtractRequest, QuoteSnapshot},
    product::{MovelId, ProductItem},
};

// ─── Quote API Port ──────────────────────────────────────────

#[async_trait(?Send)]
pub trait QuoteApiPort {
    /// `POST /chat`, for both single-mode messages and list quoting
    async fn send_chat(&self, req: &ChatRequest) -> Result<ChatReply>;

    /// `POST /extract-products`
    async fn extract_products(&self, req: &ExtractRequest) -> Result<Vec<ProductItem>>;

    /// `GET /orcamento/{session_id}`
    async fn fetch_quote(&self, session_id: &str) -> Result<QuoteSnapshot>;

    /// `DELETE /orcamento/{session_id}/remover/{movel_id}`
    async fn remove_movel(&self, session_id: &str, movel_id: MovelId) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
