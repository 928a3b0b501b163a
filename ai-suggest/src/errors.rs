//! Error types for the suggestion service.

use thiserror::Error;

pub type SuggestResult<T> = Result<T, SuggestError>;

#[derive(Debug, Error)]
pub enum SuggestError {
    /// `OPENAI_API_KEY` not configured.
    #[error("missing API key")]
    MissingApiKey,

    /// Endpoint is empty or not http(s).
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status with a payload snippet.
    #[error("bad status {status}: {snippet}")]
    BadStatus { status: u16, snippet: String },

    /// Response decoded, but carried no choices/content.
    #[error("model response carried no content")]
    EmptyResponse,
}

/// Truncates an error payload for logs and error values.
pub fn make_snippet(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect::<String>() + "…"
    }
}
