//! HTTP adapter for the quoting backend.
//!
//! Uses browser `fetch()` via gloo-net. Non-2xx responses are turned into
//! [`QuoteError::Api`] carrying whatever message the server put in its
//! `{error, detail, message}` envelope; the controller decides what the
//! user sees.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use quio_core::ports::QuoteApiPort;
use quio_types::{
    QuoteError, Result,
    api::{ApiErrorBody, ChatReply, ChatRequest, ExtractReply, ExtractRequest, QuoteSnapshot},
    config::ClientConfig,
    product::{MovelId, ProductItem},
};

/// [`QuoteApiPort`] over `fetch()`.
pub struct HttpQuoteApi {
    config: ClientConfig,
}

impl HttpQuoteApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl QuoteApiPort for HttpQuoteApi {
    async fn send_chat(&self, req: &ChatRequest) -> Result<ChatReply> {
        let url = chat_url(&self.config);
        log::debug!("POST {} (mode {})", url, req.mode.as_str());

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(req)
            .map_err(|e| QuoteError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        read_json(response).await
    }

    async fn extract_products(&self, req: &ExtractRequest) -> Result<Vec<ProductItem>> {
        let url = extract_url(&self.config);
        log::debug!("POST {}", url);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(req)
            .map_err(|e| QuoteError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        let reply: ExtractReply = read_json(response).await?;
        Ok(reply.products)
    }

    async fn fetch_quote(&self, session_id: &str) -> Result<QuoteSnapshot> {
        let url = quote_url(&self.config, session_id);
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        read_json(response).await
    }

    async fn remove_movel(&self, session_id: &str, movel_id: MovelId) -> Result<()> {
        let url = remove_url(&self.config, session_id, movel_id);
        log::debug!("DELETE {}", url);

        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}

// ─── Endpoints ───────────────────────────────────────────────

pub fn chat_url(config: &ClientConfig) -> String {
    config.endpoint("/chat")
}

pub fn extract_url(config: &ClientConfig) -> String {
    config.endpoint("/extract-products")
}

pub fn quote_url(config: &ClientConfig, session_id: &str) -> String {
    config.endpoint(&format!("/orcamento/{}", session_id))
}

pub fn remove_url(config: &ClientConfig, session_id: &str, movel_id: MovelId) -> String {
    config.endpoint(&format!("/orcamento/{}/remover/{}", session_id, movel_id))
}

// ─── Response handling ───────────────────────────────────────

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.ok() {
        return Err(rejection(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| QuoteError::Serialization(e.to_string()))
}

async fn rejection(response: Response) -> QuoteError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = parse_rejection(status, &body);
    log::warn!("Backend rejected request: {}", err);
    err
}

/// Build the error for a non-2xx response. A body that is not the JSON
/// envelope yields no message, so the caller falls back to its default.
pub fn parse_rejection(status: u16, body: &str) -> QuoteError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::resolve);
    QuoteError::Api { status, message }
}
