//! Error taxonomy for the GitLab client.
//!
//! HTTP-status aware (401→Unauthorized, 429→RateLimited, 5xx→Server, ...)
//! with `From<reqwest::Error>` for `?` ergonomics. Rejections of placement
//! calls keep the response payload so the caller can report why a comment
//! could not be anchored.

use thiserror::Error;

/// Convenient alias for client results.
pub type GitLabResult<T> = Result<T, GitLabError>;

#[derive(Debug, Error)]
pub enum GitLabError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited,

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Non-success response to a POST, payload snippet preserved.
    #[error("rejected: status={status} detail={detail}")]
    Rejected { status: u16, detail: String },

    /// Bad configuration (missing token, malformed header value).
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GitLabError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return GitLabError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => GitLabError::Unauthorized,
                403 => GitLabError::Forbidden,
                404 => GitLabError::NotFound,
                429 => GitLabError::RateLimited,
                500..=599 => GitLabError::Server(code),
                _ => GitLabError::HttpStatus(code),
            };
        }
        GitLabError::Network(e.to_string())
    }
}
