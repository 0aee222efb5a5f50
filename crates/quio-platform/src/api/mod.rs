pub mod http;

pub use http::HttpQuoteApi;
