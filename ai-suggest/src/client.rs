//! Thin client for an OpenAI-compatible chat completions API.
//!
//! Constructor validation:
//! - `cfg.api_key` must be non-empty
//! - `cfg.endpoint` must start with http:// or https://
//!
//! One high-level operation: [`SuggestClient::generate_suggestions`] — a
//! single non-streaming chat completion over the diff text, decoded into
//! untrusted `Suggestion` records.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SuggestConfig;
use crate::decode::decode_suggestions;
use crate::errors::{SuggestError, SuggestResult, make_snippet};
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt};
use crate::types::Suggestion;

#[derive(Debug, Clone)]
pub struct SuggestClient {
    http: reqwest::Client,
    url_chat: String,
    model: String,
}

impl SuggestClient {
    /// Creates a client from the given config.
    ///
    /// # Errors
    /// - [`SuggestError::MissingApiKey`] if the key is empty
    /// - [`SuggestError::InvalidEndpoint`] if the endpoint is not http(s)
    /// - [`SuggestError::Http`] if the HTTP client cannot be built
    pub fn new(cfg: SuggestConfig) -> SuggestResult<Self> {
        if cfg.api_key.trim().is_empty() {
            return Err(SuggestError::MissingApiKey);
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(SuggestError::InvalidEndpoint(cfg.endpoint.clone()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
                .map_err(|_| SuggestError::MissingApiKey)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'));

        info!(model = %cfg.model, endpoint = %cfg.endpoint, "SuggestClient initialized");

        Ok(Self {
            http,
            url_chat,
            model: cfg.model,
        })
    }

    /// Asks the model to review `diff_text` and decodes its answer.
    ///
    /// An answer the model fails to format as JSON counts as "no
    /// suggestions"; a response without choices is an error, since the event
    /// cannot tell silence from failure in that case.
    pub async fn generate_suggestions(&self, diff_text: &str) -> SuggestResult<Vec<Suggestion>> {
        let t0 = Instant::now();

        let req = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_prompt(diff_text),
                },
            ],
            temperature: 0.2,
        };

        let resp = self.http.post(&self.url_chat).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SuggestError::BadStatus {
                status: status.as_u16(),
                snippet: make_snippet(&body, 300),
            });
        }

        let chat: ChatResponse = resp.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(SuggestError::EmptyResponse)?;

        let suggestions = decode_suggestions(&content);
        debug!(
            "llm: {} suggestion(s) in {} ms",
            suggestions.len(),
            t0.elapsed().as_millis()
        );
        Ok(suggestions)
    }
}

// ===== Wire DTOs =====

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
