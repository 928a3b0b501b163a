//! GitLab webhook payload (the fields this service reads).

use serde::Deserialize;

/// Top-level webhook event. Only `object_kind == "merge_request"` events are
/// processed; everything else is acknowledged and dropped.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub object_kind: String,
    pub project: Option<ProjectInfo>,
    pub object_attributes: Option<MrAttributes>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectInfo {
    pub id: u64,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MrAttributes {
    pub iid: u64,
    pub action: Option<String>,
    pub title: Option<String>,
}
