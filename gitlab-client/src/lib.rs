//! GitLab REST v4 client for merge request review.
//!
//! Endpoints used:
//! - GET  /projects/:id/merge_requests/:iid              (metadata, diff refs)
//! - GET  /projects/:id/merge_requests/:iid/diffs        (preferred over deprecated /changes)
//! - POST /projects/:id/merge_requests/:iid/discussions  (inline comment)
//! - POST /projects/:id/merge_requests/:iid/notes        (plain note)
//!
//! Inline positions require the base/start/head SHA triple from MR metadata;
//! the SHAs are passed through from the caller unmodified.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{GitLabClient, GitLabConfig};
pub use errors::{GitLabError, GitLabResult};
pub use types::{MrId, MrMeta};
