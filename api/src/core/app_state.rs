use ai_suggest::SuggestConfig;
use gitlab_client::GitLabConfig;
use review_publisher::ReviewDispatchConfig;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared secret compared against the `X-Gitlab-Token` webhook header.
    pub webhook_secret: String,
    /// GitLab API base + token.
    pub gitlab: GitLabConfig,
    /// Suggestion service configuration.
    pub suggest: SuggestConfig,
    /// Placement concurrency / dry-run knobs.
    pub dispatch: ReviewDispatchConfig,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Self {
        Self {
            webhook_secret: std::env::var("WEBHOOK_SECRET").expect("WEBHOOK_SECRET is required"),
            gitlab: GitLabConfig::from_env().expect("GitLab configuration is required"),
            suggest: SuggestConfig::from_env().expect("suggestion service configuration is required"),
            dispatch: ReviewDispatchConfig::default(),
        }
    }
}
