//! Wire types for the quoting API.
//!
//! Request bodies are serialized as-is; response bodies are lenient
//! (missing or `null` fields default) because the backend omits fields
//! freely and sends unset optionals as `null`.

use serde::{Deserialize, Serialize};
use crate::message::ChatOption;
use crate::product::{Componente, MovelId, ProductItem};
use crate::session::ChatMode;

/// Message body the backend recognizes as "price the whole list".
pub const GENERATE_MULTIPLE_QUOTE: &str = "generate_multiple_quote";

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    pub mode: ChatMode,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub products: Option<Vec<ProductItem>>,
}

impl ChatRequest {
    pub fn single(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
            mode: ChatMode::Single,
            products: None,
        }
    }

    pub fn generate_multiple_quote(session_id: impl Into<String>, products: Vec<ProductItem>) -> Self {
        Self {
            message: GENERATE_MULTIPLE_QUOTE.to_string(),
            session_id: session_id.into(),
            mode: ChatMode::Multiple,
            products: Some(products),
        }
    }
}

/// Response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub response: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub pdf_ready: bool,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub options: Vec<ChatOption>,
}

impl ChatReply {
    /// Path of a ready PDF, relative to the API base.
    ///
    /// `pdf_ready` + `download_url` wins; a bare `pdf_url` is accepted
    /// for older backends.
    pub fn pdf_path(&self) -> Option<&str> {
        if self.pdf_ready {
            if let Some(url) = self.download_url.as_deref().filter(|u| !u.is_empty()) {
                return Some(url);
            }
        }
        self.pdf_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Body of `POST /extract-products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub message: String,
    pub session_id: String,
}

/// Response of `POST /extract-products`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractReply {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub products: Vec<ProductItem>,
}

/// A furniture item as the server tracks it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovelItem {
    pub id: MovelId,
    #[serde(alias = "name")]
    pub nome: String,
    #[serde(alias = "price", alias = "preco", default, deserialize_with = "crate::de::null_as_default")]
    pub preco_total: f64,
    #[serde(alias = "dimensions", default)]
    pub dimensoes: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(alias = "color", default)]
    pub cor: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub componentes: Vec<Componente>,
}

impl From<MovelItem> for ProductItem {
    /// Every móvel counts once; its price already covers its components.
    fn from(m: MovelItem) -> Self {
        ProductItem {
            id: Some(m.id),
            name: m.nome,
            quantity: 1,
            price: m.preco_total,
            dimensions: m.dimensoes,
            material: m.material,
            color: m.cor,
            componentes: m.componentes,
        }
    }
}

/// Response of `GET /orcamento/{session_id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub moveis: Vec<MovelItem>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub total: f64,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub finalizado: bool,
}

impl QuoteSnapshot {
    pub fn into_products(self) -> Vec<ProductItem> {
        self.moveis.into_iter().map(ProductItem::from).collect()
    }
}

/// Error envelope shared by every endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    /// FastAPI puts validation failures here as a list; only a plain
    /// string is used as a message.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// First non-empty of `error`, `detail`, `message`.
    pub fn resolve(self) -> Option<String> {
        let detail = self.detail.and_then(|d| d.as_str().map(String::from));
        [self.error, detail, self.message]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}
