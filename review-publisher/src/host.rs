//! Placement host abstraction.
//!
//! The dispatcher talks to the review system through `CommentHost`: one
//! operation for anchored inline placement, one for plain notes. No
//! async-trait, no boxed trait objects — plain `impl Future` methods with
//! static dispatch, so tests can inject a fake host.

use std::future::Future;

use diff_index::DiffRefs;
use gitlab_client::{GitLabClient, GitLabError, MrId};
use thiserror::Error;

/// Failure of a single host call, flattened to a reportable message.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl From<GitLabError> for HostError {
    fn from(e: GitLabError) -> Self {
        HostError(e.to_string())
    }
}

/// One anchored placement request. The revision markers come with the diff
/// bundle and are passed through unmodified.
#[derive(Debug, Clone)]
pub struct InlinePlacement {
    pub path: String,
    pub line: u32,
    pub anchor: String,
    pub body: String,
    pub refs: DiffRefs,
}

/// A review system that can carry comments for one change request.
pub trait CommentHost: Clone + Send + Sync + 'static {
    /// Places one comment anchored at the given new-file position.
    fn place_inline(
        &self,
        req: InlinePlacement,
    ) -> impl Future<Output = Result<(), HostError>> + Send;

    /// Posts one plain, unanchored comment.
    fn post_note(&self, body: String) -> impl Future<Output = Result<(), HostError>> + Send;
}

/// GitLab-backed host bound to one merge request.
#[derive(Debug, Clone)]
pub struct GitLabMrHost {
    client: GitLabClient,
    mr: MrId,
}

impl GitLabMrHost {
    pub fn new(client: GitLabClient, mr: MrId) -> Self {
        Self { client, mr }
    }
}

impl CommentHost for GitLabMrHost {
    fn place_inline(
        &self,
        req: InlinePlacement,
    ) -> impl Future<Output = Result<(), HostError>> + Send {
        async move {
            // GitLab anchors by position (path + line + SHA triple); the
            // position object has no slot for an opaque token, so the anchor
            // rides in the body as a hidden marker.
            let body = format!("{}\n\n<!-- anchor:{} -->", req.body, req.anchor);
            self.client
                .post_inline_discussion(&self.mr, &req.path, req.line, &body, &req.refs)
                .await
                .map(|_| ())
                .map_err(HostError::from)
        }
    }

    fn post_note(&self, body: String) -> impl Future<Output = Result<(), HostError>> + Send {
        async move {
            self.client
                .post_note(&self.mr, &body)
                .await
                .map(|_| ())
                .map_err(HostError::from)
        }
    }
}
