//! Lenient decoding of the model's answer into `Suggestion` records.
//!
//! The contract downstream is: clean structured records, or an explicit
//! empty sequence. Three failure layers are absorbed here:
//! - markdown code fences around the payload;
//! - a payload that is not a JSON array at all (prose, refusal text) —
//!   decoded as "no suggestions", logged at `warn!`;
//! - individual array elements of the wrong shape — decoded as fully-unset
//!   records so the validator classifies them instead of losing them.

use serde_json::Value;
use tracing::warn;

use crate::types::Suggestion;

/// Strips a surrounding markdown code fence (``` or ```json) when present.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the optional language tag on the opening fence line.
    match rest.split_once('\n') {
        Some((_lang, body)) => body.trim(),
        None => rest.trim(),
    }
}

/// Decodes the model answer into suggestion records.
///
/// Never fails: undecodable payloads become an empty sequence.
pub fn decode_suggestions(content: &str) -> Vec<Suggestion> {
    let cleaned = strip_code_fences(content);

    let values: Vec<Value> = match serde_json::from_str(cleaned) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("model answer was valid JSON but not an array; treating as no suggestions");
            return Vec::new();
        }
        Err(e) => {
            warn!("model answer was not JSON ({e}); treating as no suggestions");
            return Vec::new();
        }
    };

    values
        .into_iter()
        .map(|v| serde_json::from_value::<Suggestion>(v).unwrap_or_default())
        .collect()
}
