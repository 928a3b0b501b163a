//! Review-suggestion service (OpenAI-compatible chat completions).
//!
//! Sends the concatenated unified diff of a merge request to a chat model
//! and returns structured, untrusted `Suggestion` records:
//!
//! - non-streaming POST {endpoint}/v1/chat/completions, low temperature;
//! - the system prompt demands a bare JSON array of
//!   `{"file", "line", "comment"}` objects;
//! - markdown fences are stripped and the payload is decoded leniently, so a
//!   model that answers with prose produces an explicit empty sequence and a
//!   model that mangles a single element still yields a record the validator
//!   can classify.
//!
//! Nothing here is trusted: line numbers and file paths are validated against
//! the diff index downstream.

pub mod client;
pub mod config;
pub mod decode;
pub mod errors;
pub mod prompt;
pub mod types;

pub use client::SuggestClient;
pub use config::SuggestConfig;
pub use errors::{SuggestError, SuggestResult};
pub use types::Suggestion;
