//! Event-level errors for the review pipeline.
//!
//! Only pre-core failures (provider fetch, model call) and summary posting
//! abort an event; per-suggestion failures are absorbed by the dispatcher.

use thiserror::Error;

use crate::host::HostError;

pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Debug, Error)]
pub enum FlowError {
    /// GitLab fetch failed; the core was never reached.
    #[error(transparent)]
    GitLab(#[from] gitlab_client::GitLabError),

    /// Suggestion service failed; nothing to review.
    #[error(transparent)]
    Suggest(#[from] ai_suggest::SuggestError),

    /// Posting the aggregate summary note failed.
    #[error("summary note failed: {0}")]
    Summary(#[from] HostError),
}
