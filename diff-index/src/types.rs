//! Data model for one change request's diffs.
//!
//! These types are the normalized input of the addressing pipeline. They are
//! immutable after construction and owned by the event that built them.

use serde::{Deserialize, Serialize};

/// Triple of revision markers that binds inline comments to a diff version.
///
/// GitLab exposes base/start/head; `start_sha` stays optional so providers
/// that only expose base/head are still representable. The markers are passed
/// through to every anchored placement unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRefs {
    pub base_sha: String,
    pub start_sha: Option<String>,
    pub head_sha: String,
}

/// One changed file and its raw unified diff text (may hold several hunks).
///
/// At least one of `old_path`/`new_path` is present: an absent `old_path`
/// means the file was created, an absent `new_path` means it was deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub raw_diff: String,
}

impl FileChange {
    /// The path lines of this file are addressed under: the new path when the
    /// file still exists, otherwise the old one.
    pub fn resolved_path(&self) -> Option<&str> {
        self.new_path.as_deref().or(self.old_path.as_deref())
    }
}

/// All file changes of one change request plus its revision markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffBundle {
    pub refs: DiffRefs,
    pub files: Vec<FileChange>,
}

impl DiffBundle {
    /// Renders the bundle back into one unified diff text, file headers
    /// included, for prompt assembly.
    pub fn concatenated_diff(&self) -> String {
        let mut out = String::new();
        for fc in &self.files {
            let old = fc.old_path.as_deref().unwrap_or("/dev/null");
            let new = fc.new_path.as_deref().unwrap_or("/dev/null");
            out.push_str(&format!("diff --git a/{} b/{}\n", old, new));
            out.push_str(&fc.raw_diff);
            if !fc.raw_diff.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}

/// One classified line of a unified diff hunk.
///
/// Invariants: `Added` carries only a new-file number, `Removed` only an
/// old-file number, `Context` both (advanced in lockstep).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineRecord {
    Added { new_line: u32 },
    Removed { old_line: u32 },
    Context { old_line: u32, new_line: u32 },
}
