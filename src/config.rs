use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upstream settings, read once at process start and never mutated.
///
/// A missing `api_key` is not a load failure: the handler reports it per request
/// so the function still answers with a JSON error instead of failing to boot.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads the vars.
    pub fn from_env() -> Self {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Self {
            api_key: get_non_empty("GEMINI_API_KEY"),
            model: get_non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            base_url: get_non_empty("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn generate_content_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

fn get_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
