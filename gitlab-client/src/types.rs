//! Identifiers and metadata for one merge request.

use chrono::{DateTime, Utc};
use diff_index::DiffRefs;
use serde::{Deserialize, Serialize};

/// A unique reference to a merge request.
///
/// * `project` – numeric ID or "group/project" path (URL-encoded on use).
/// * `iid`     – MR IID within that project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrId {
    pub project: String,
    pub iid: u64,
}

/// High-level MR metadata. `diff_refs` carries the SHA triple every inline
/// comment position must be bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrMeta {
    pub title: String,
    pub state: String,
    pub web_url: String,
    pub source_branch: Option<String>,
    pub target_branch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub diff_refs: DiffRefs,
}
