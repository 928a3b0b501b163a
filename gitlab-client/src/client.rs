//! HTTP client for the GitLab REST v4 API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use diff_index::{DiffRefs, FileChange};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::errors::{GitLabError, GitLabResult};
use crate::types::{MrId, MrMeta};

/// Runtime configuration for the client.
#[derive(Debug, Clone)]
pub struct GitLabConfig {
    /// API base, e.g. "https://gitlab.com/api/v4".
    pub base_api: String,
    /// Personal or project access token ("PRIVATE-TOKEN").
    pub token: String,
}

impl GitLabConfig {
    /// Reads `GITLAB_API_BASE` (default "https://gitlab.com/api/v4") and
    /// `GITLAB_TOKEN` (required).
    pub fn from_env() -> GitLabResult<Self> {
        let base_api = std::env::var("GITLAB_API_BASE")
            .unwrap_or_else(|_| "https://gitlab.com/api/v4".to_string());
        let token = std::env::var("GITLAB_TOKEN")
            .map_err(|_| GitLabError::Config("GITLAB_TOKEN is not set".into()))?;
        Ok(Self { base_api, token })
    }
}

#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_api: String,
}

impl GitLabClient {
    /// Builds a client with auth headers and conservative timeouts.
    pub fn new(cfg: GitLabConfig) -> GitLabResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("mr-review-bot/0.1"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "PRIVATE-TOKEN",
            HeaderValue::from_str(&cfg.token)
                .map_err(|e| GitLabError::Config(format!("bad token: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_api: cfg.base_api.trim_end_matches('/').to_string(),
        })
    }

    fn mr_url(&self, id: &MrId, tail: &str) -> String {
        format!(
            "{}/projects/{}/merge_requests/{}{}",
            self.base_api,
            urlencoding::encode(&id.project),
            id.iid,
            tail
        )
    }

    /// Fetches MR metadata, including the `diff_refs` SHA triple.
    pub async fn get_meta(&self, id: &MrId) -> GitLabResult<MrMeta> {
        let resp: GitLabMr = self
            .http
            .get(self.mr_url(id, ""))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(MrMeta {
            title: resp.title,
            state: resp.state,
            web_url: resp.web_url,
            source_branch: Some(resp.source_branch),
            target_branch: Some(resp.target_branch),
            created_at: resp.created_at,
            updated_at: resp.updated_at,
            diff_refs: DiffRefs {
                base_sha: resp.diff_refs.base_sha,
                start_sha: Some(resp.diff_refs.start_sha),
                head_sha: resp.diff_refs.head_sha,
            },
        })
    }

    /// Fetches file-level diffs and maps them to the normalized model.
    ///
    /// `new_file` clears the old path, `deleted_file` clears the new one;
    /// binary diffs arrive without text and yield an empty `raw_diff`.
    pub async fn get_diff_files(&self, id: &MrId) -> GitLabResult<Vec<FileChange>> {
        let files: Vec<GitLabMrDiffFile> = self
            .http
            .get(self.mr_url(id, "/diffs"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("gitlab: fetched {} diff file(s) for !{}", files.len(), id.iid);

        Ok(files.into_iter().map(map_diff_file).collect())
    }

    /// Creates an inline discussion anchored at `new_path`/`new_line` within
    /// the given SHA triple. Returns the discussion id.
    pub async fn post_inline_discussion(
        &self,
        id: &MrId,
        path: &str,
        new_line: u32,
        body: &str,
        refs: &DiffRefs,
    ) -> GitLabResult<String> {
        #[derive(serde::Serialize)]
        struct Position<'a> {
            position_type: &'a str,
            new_path: &'a str,
            new_line: u32,
            base_sha: &'a str,
            start_sha: &'a str,
            head_sha: &'a str,
        }
        #[derive(serde::Serialize)]
        struct Req<'a> {
            body: &'a str,
            position: Position<'a>,
        }

        let req = Req {
            body,
            position: Position {
                position_type: "text",
                new_path: path,
                new_line,
                base_sha: &refs.base_sha,
                start_sha: refs.start_sha.as_deref().unwrap_or_default(),
                head_sha: &refs.head_sha,
            },
        };

        debug!("gitlab: inline POST path={} line={}", path, new_line);
        let resp = self
            .http
            .post(self.mr_url(id, "/discussions"))
            .json(&req)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(rejected(resp).await);
        }

        #[derive(Deserialize)]
        struct DiscussionResp {
            id: String,
        }
        let disc: DiscussionResp = resp.json().await?;
        Ok(disc.id)
    }

    /// Posts a plain MR note. Returns the note id.
    pub async fn post_note(&self, id: &MrId, body: &str) -> GitLabResult<u64> {
        #[derive(serde::Serialize)]
        struct Req<'a> {
            body: &'a str,
        }

        debug!("gitlab: note POST iid={}", id.iid);
        let resp = self
            .http
            .post(self.mr_url(id, "/notes"))
            .json(&Req { body })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(rejected(resp).await);
        }

        #[derive(Deserialize)]
        struct NoteResp {
            id: u64,
        }
        let note: NoteResp = resp.json().await?;
        Ok(note.id)
    }
}

/// Consumes a non-success response into a `Rejected` error with a short
/// payload snippet.
async fn rejected(resp: reqwest::Response) -> GitLabError {
    let status = resp.status().as_u16();
    let detail = match resp.text().await {
        Ok(body) => snippet(&body, 300),
        Err(e) => format!("<unreadable body: {e}>"),
    };
    GitLabError::Rejected { status, detail }
}

fn map_diff_file(f: GitLabMrDiffFile) -> FileChange {
    FileChange {
        old_path: if f.new_file { None } else { Some(f.old_path) },
        new_path: if f.deleted_file { None } else { Some(f.new_path) },
        raw_diff: f.diff.unwrap_or_default(),
    }
}

fn snippet(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect::<String>() + "…"
    }
}

// ===== Wire DTOs =====

#[derive(Deserialize)]
struct GitLabMr {
    title: String,
    state: String,
    web_url: String,
    source_branch: String,
    target_branch: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    diff_refs: GitLabDiffRefs,
}

#[derive(Deserialize)]
struct GitLabDiffRefs {
    base_sha: String,
    start_sha: String,
    head_sha: String,
}

#[derive(Deserialize)]
struct GitLabMrDiffFile {
    old_path: String,
    new_path: String,
    #[serde(default)]
    new_file: bool,
    #[serde(default)]
    deleted_file: bool,
    diff: Option<String>,
}
