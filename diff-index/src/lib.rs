//! Diff line-addressing for merge request review.
//!
//! This crate turns the raw unified diffs of one change request into a
//! queryable, per-file map of addressable lines:
//!
//! 1) **Parse** — scan each file's unified diff into `LineRecord`s with exact
//!    old/new line numbering across all hunks;
//! 2) **Index** — keep only lines that exist in the new-file view (added and
//!    context) and key them by new-file line number;
//! 3) **Anchor** — attach a deterministic, content-independent token to every
//!    addressable line, suitable for anchoring an inline comment.
//!
//! Everything here is pure and synchronous: no I/O, no shared state. A bundle
//! and its index are built fresh per incoming event and dropped afterwards.

pub mod anchor;
pub mod index;
pub mod parser;
pub mod types;

pub use anchor::{OLD_LINE_SENTINEL, line_anchor};
pub use index::{AnchorKind, AnchoredLine, BundleIndex, LineIndex};
pub use parser::parse_file_diff;
pub use types::{DiffBundle, DiffRefs, FileChange, LineRecord};
