//! Untrusted suggestion records.

use serde::{Deserialize, Serialize};

/// One candidate review comment as produced by the model.
///
/// Every field is optional on purpose: records are decoded leniently so that
/// malformed elements reach the validator and are classified there, instead
/// of being silently dropped at decode time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}
