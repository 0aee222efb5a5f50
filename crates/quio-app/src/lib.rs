//! Quio App: WASM entry point.
//!
//! This crate is the composition root. It builds the HTTP adapter, hands
//! it to a [`quio_core::controller::QuoteController`] and exposes the
//! result to JavaScript as [`QuioClient`]. Rendering is left to whatever
//! page drives the client.

mod client;
mod convert;

pub use client::QuioClient;

use wasm_bindgen::prelude::*;

/// WASM entry point, runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Quio WASM starting...");
}
