//! Per-file and per-bundle line indexes.
//!
//! Only lines that exist in the new-file view (added and context) are
//! addressable; removed lines have no new-file position and are recorded
//! nowhere. Keys are new-file line numbers, strictly increasing within a
//! well-formed diff, so no collisions are possible.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::anchor::{OLD_LINE_SENTINEL, line_anchor};
use crate::parser::parse_file_diff;
use crate::types::{DiffBundle, LineRecord};

/// Kind of an addressable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Added,
    Context,
}

/// Metadata held for one addressable new-file line.
#[derive(Debug, Clone)]
pub struct AnchoredLine {
    pub kind: AnchorKind,
    /// Old-file line for context lines; `None` for pure additions.
    pub old_line: Option<u32>,
    /// Deterministic position token, see [`crate::anchor`].
    pub anchor: String,
}

/// Addressable lines of a single file, keyed by new-file line number.
#[derive(Debug, Clone)]
pub struct LineIndex {
    path: String,
    lines: BTreeMap<u32, AnchoredLine>,
}

impl LineIndex {
    /// Builds the index for one file from its parsed record sequence.
    pub fn build(path: &str, records: &[LineRecord]) -> Self {
        let mut lines = BTreeMap::new();
        for record in records {
            match *record {
                LineRecord::Added { new_line } => {
                    lines.insert(
                        new_line,
                        AnchoredLine {
                            kind: AnchorKind::Added,
                            old_line: None,
                            anchor: line_anchor(path, OLD_LINE_SENTINEL, new_line),
                        },
                    );
                }
                LineRecord::Context { old_line, new_line } => {
                    lines.insert(
                        new_line,
                        AnchoredLine {
                            kind: AnchorKind::Context,
                            old_line: Some(old_line),
                            anchor: line_anchor(path, old_line, new_line),
                        },
                    );
                }
                LineRecord::Removed { .. } => {}
            }
        }
        Self {
            path: path.to_string(),
            lines,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Looks up one addressable new-file line.
    pub fn get(&self, new_line: u32) -> Option<&AnchoredLine> {
        self.lines.get(&new_line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Line indexes for every file of one change request.
#[derive(Debug, Clone, Default)]
pub struct BundleIndex {
    files: HashMap<String, LineIndex>,
}

impl BundleIndex {
    /// Parses every file change in the bundle and indexes its addressable
    /// lines. Files without a resolvable path are skipped.
    pub fn build(bundle: &DiffBundle) -> Self {
        let mut files = HashMap::with_capacity(bundle.files.len());
        for fc in &bundle.files {
            let Some(path) = fc.resolved_path() else {
                continue;
            };
            let records = parse_file_diff(&fc.raw_diff);
            let index = LineIndex::build(path, &records);
            debug!(
                "indexed {}: {} addressable line(s) from {} record(s)",
                path,
                index.len(),
                records.len()
            );
            files.insert(path.to_string(), index);
        }
        Self { files }
    }

    /// Resolves a `(file, line)` reference to its addressable-line metadata.
    pub fn resolve(&self, file: &str, new_line: u32) -> Option<&AnchoredLine> {
        self.files.get(file)?.get(new_line)
    }

    pub fn file(&self, path: &str) -> Option<&LineIndex> {
        self.files.get(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total addressable lines across all files.
    pub fn line_count(&self) -> usize {
        self.files.values().map(LineIndex::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiffRefs, FileChange};

    fn bundle_with(path: &str, raw_diff: &str) -> DiffBundle {
        DiffBundle {
            refs: DiffRefs {
                base_sha: "base".into(),
                start_sha: Some("start".into()),
                head_sha: "head".into(),
            },
            files: vec![FileChange {
                old_path: Some(path.to_string()),
                new_path: Some(path.to_string()),
                raw_diff: raw_diff.to_string(),
            }],
        }
    }

    #[test]
    fn scenario_single_hunk_addressability() {
        let bundle = bundle_with("x.ts", "@@ -10,3 +10,4 @@\n a\n+b\n c\n d\n");
        let index = BundleIndex::build(&bundle);

        let line10 = index.resolve("x.ts", 10).unwrap();
        assert_eq!(line10.kind, AnchorKind::Context);
        assert_eq!(line10.old_line, Some(10));

        let line11 = index.resolve("x.ts", 11).unwrap();
        assert_eq!(line11.kind, AnchorKind::Added);
        assert_eq!(line11.old_line, None);
        assert_eq!(line11.anchor, line_anchor("x.ts", OLD_LINE_SENTINEL, 11));

        let line12 = index.resolve("x.ts", 12).unwrap();
        assert_eq!(line12.old_line, Some(11));
        let line13 = index.resolve("x.ts", 13).unwrap();
        assert_eq!(line13.old_line, Some(12));

        assert!(index.resolve("x.ts", 14).is_none());
    }

    #[test]
    fn removed_lines_are_not_addressable() {
        let bundle = bundle_with("y.rs", "@@ -1,3 +1,2 @@\n a\n-b\n c\n");
        let index = BundleIndex::build(&bundle);
        let file = index.file("y.rs").unwrap();
        assert_eq!(file.len(), 2);
        assert!(file.get(1).is_some());
        assert!(file.get(2).is_some());
        assert!(file.get(3).is_none());
    }

    #[test]
    fn rename_without_content_change_yields_empty_index() {
        let bundle = DiffBundle {
            refs: DiffRefs {
                base_sha: "base".into(),
                start_sha: None,
                head_sha: "head".into(),
            },
            files: vec![FileChange {
                old_path: Some("old_name.rs".into()),
                new_path: Some("new_name.rs".into()),
                raw_diff: String::new(),
            }],
        };
        let index = BundleIndex::build(&bundle);
        let file = index.file("new_name.rs").unwrap();
        assert!(file.is_empty());
        assert!(index.resolve("new_name.rs", 1).is_none());
        // Indexed under the new path, not the old one.
        assert!(index.file("old_name.rs").is_none());
    }

    #[test]
    fn deleted_file_is_indexed_under_old_path() {
        let bundle = DiffBundle {
            refs: DiffRefs {
                base_sha: "base".into(),
                start_sha: None,
                head_sha: "head".into(),
            },
            files: vec![FileChange {
                old_path: Some("gone.rs".into()),
                new_path: None,
                raw_diff: "@@ -1,2 +0,0 @@\n-a\n-b\n".into(),
            }],
        };
        let index = BundleIndex::build(&bundle);
        // All lines removed: present in the map, but nothing addressable.
        assert_eq!(index.file("gone.rs").map(LineIndex::len), Some(0));
    }
}
