//! Quio session core.
//!
//! Holds one chat session's state and the operations that move it:
//! synchronous reducers on [`store::SessionStore`], asynchronous API
//! operations on [`controller::QuoteController`], and the merge rule in
//! [`reconcile`]. Everything talks to the network through
//! [`ports::QuoteApiPort`], so the crate builds and tests natively.

pub mod ports;
pub mod event_bus;
pub mod reconcile;
pub mod store;
pub mod controller;
pub mod notify;
pub mod projects;
