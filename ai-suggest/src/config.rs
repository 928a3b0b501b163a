//! Configuration for the suggestion service.

use crate::errors::{SuggestError, SuggestResult};

/// Explicit configuration, read once at startup and passed in — never
/// consulted as ambient globals by the request flow.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// OpenAI-compatible API base, e.g. "https://api.openai.com".
    pub endpoint: String,
    /// Bearer token.
    pub api_key: String,
    /// Chat model name.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SuggestConfig {
    /// Reads `OPENAI_API_KEY` (required), `OPENAI_API_BASE` (default
    /// "https://api.openai.com"), `OPENAI_MODEL` (default "gpt-4o") and
    /// `OPENAI_TIMEOUT_SECS` (default 60).
    pub fn from_env() -> SuggestResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| SuggestError::MissingApiKey)?;
        let endpoint = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        Ok(Self {
            endpoint,
            api_key,
            model,
            timeout_secs,
        })
    }
}
