//! Quio platform adapters.
//!
//! Implements the `quio-core` port traits with browser APIs. Only the
//! HTTP adapter exists today; it speaks to the quoting backend through
//! `fetch()` via gloo-net.

pub mod api;
