use serde::{Deserialize, Serialize};

/// Base URL used when the build does not set `QUIO_API_BASE_URL`.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Display name used when the build does not set `QUIO_USER_NAME`.
pub const DEFAULT_DISPLAY_NAME: &str = "Usuário";
pub const BOT_NAME: &str = "QuioAI";

/// Client configuration. Values are baked in at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Quoting API root, without a trailing slash
    pub api_base: String,
    /// Name shown next to user messages
    pub display_name: String,
    /// Name shown next to bot messages
    pub bot_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: normalize_base(option_env!("QUIO_API_BASE_URL").unwrap_or(DEFAULT_API_BASE)),
            display_name: option_env!("QUIO_USER_NAME")
                .unwrap_or(DEFAULT_DISPLAY_NAME)
                .to_string(),
            bot_name: BOT_NAME.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = normalize_base(base);
        self
    }

    /// Absolute URL for an API path such as `/chat`.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }

    /// Link to a generated PDF. The server hands back a path relative to
    /// the API root, with or without a leading `/`.
    pub fn pdf_link(&self, download_url: &str) -> String {
        self.endpoint(download_url)
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
