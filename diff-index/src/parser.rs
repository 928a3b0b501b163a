//! Unified-diff hunk parser.
//!
//! Scans the raw diff text of a single file change and emits `LineRecord`s
//! with exact old/new line numbering:
//! - works on hunks-only input; file headers (`---`/`+++`) are tolerated;
//! - ignores `\ No newline at end of file` marker lines;
//! - binary patches (`GIT binary patch`, `Binary files ... differ`) yield no
//!   records;
//! - a malformed `@@` header never leaks stale counters: numbering is
//!   suspended until the next valid header, and content lines seen while
//!   suspended are dropped rather than mis-counted.
//!
//! Counter convention: on a header `@@ -O[,L] +N[,M] @@` the running counters
//! reset to `O-1`/`N-1` and are incremented BEFORE being attached to a
//! record. Length counts `L`/`M` are informational only.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::LineRecord;

lazy_static! {
    static ref HUNK_HEADER: Regex =
        Regex::new(r"^@@ -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@").unwrap();
}

/// Parses one file's unified diff text into an ordered record sequence.
///
/// A diff with zero hunks (e.g. a pure rename) yields an empty sequence;
/// that is a valid result, not an error.
pub fn parse_file_diff(raw: &str) -> Vec<LineRecord> {
    let mut records = Vec::new();

    if looks_like_binary_patch(raw) {
        return records;
    }

    // (old, new) counters; `None` until the first valid hunk header.
    let mut counters: Option<(u32, u32)> = None;

    for line in raw.lines() {
        if line.starts_with("@@") {
            counters = parse_hunk_header(line)
                .map(|(old_start, new_start)| (old_start.wrapping_sub(1), new_start.wrapping_sub(1)));
            continue;
        }

        // "\ No newline at end of file" and friends: not diff content.
        if line.starts_with('\\') {
            continue;
        }

        let Some((old, new)) = counters.as_mut() else {
            continue;
        };

        // File header markers are not content lines.
        if line.starts_with("+++") || line.starts_with("---") {
            continue;
        }

        if line.starts_with('+') {
            *new += 1;
            records.push(LineRecord::Added { new_line: *new });
        } else if line.starts_with('-') {
            *old += 1;
            records.push(LineRecord::Removed { old_line: *old });
        } else if !line.is_empty() {
            *old += 1;
            *new += 1;
            records.push(LineRecord::Context {
                old_line: *old,
                new_line: *new,
            });
        }
    }

    records
}

/// Extracts `(old_start, new_start)` from a `@@ -O[,L] +N[,M] @@` header.
/// Returns `None` for anything that does not match exactly.
fn parse_hunk_header(line: &str) -> Option<(u32, u32)> {
    let caps = HUNK_HEADER.captures(line)?;
    let old_start: u32 = caps.get(1)?.as_str().parse().ok()?;
    let new_start: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some((old_start, new_start))
}

/// Heuristic for binary patches inside unified diff text.
pub fn looks_like_binary_patch(raw: &str) -> bool {
    raw.contains("GIT binary patch")
        || raw.contains("Binary files ")
        || (raw.starts_with("Files ") && raw.contains(" differ"))
        || raw.bytes().any(|b| b == 0)
}
