//! WASM-target tests for quio-platform (Node.js runtime).
//!
//! Covers URL building and rejection parsing under wasm32-unknown-unknown
//! via `wasm-pack test --node`. Live requests need a backend and are not
//! exercised here.

use wasm_bindgen_test::*;

use quio_core::ports::QuoteApiPort;
use quio_platform::api::http::{parse_rejection, quote_url, remove_url};
use quio_platform::api::HttpQuoteApi;
use quio_types::config::ClientConfig;
use quio_types::product::MovelId;

#[wasm_bindgen_test]
fn http_backend_name() {
    let api = HttpQuoteApi::new(ClientConfig::default());
    assert_eq!(api.backend_name(), "http");
}

#[wasm_bindgen_test]
fn quote_endpoints() {
    let config = ClientConfig::default().with_api_base("http://localhost:8000/");
    assert_eq!(quote_url(&config, "s1"), "http://localhost:8000/orcamento/s1");
    assert_eq!(
        remove_url(&config, "s1", MovelId(3)),
        "http://localhost:8000/orcamento/s1/remover/3"
    );
}

#[wasm_bindgen_test]
fn rejection_envelope() {
    let err = parse_rejection(400, r#"{"message": "Limite atingido"}"#);
    assert_eq!(err.server_message(), Some("Limite atingido"));
}
