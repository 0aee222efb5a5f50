pub mod message;
pub mod product;
pub mod api;
pub mod session;
pub mod event;
pub mod config;
pub mod error;
pub mod money;
pub mod project;
mod de;

#[cfg(test)]
mod tests;

pub use error::QuoteError;
pub type Result<T> = std::result::Result<T, QuoteError>;
