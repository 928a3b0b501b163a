//! Suggestion screening against the diff line index.
//!
//! The suggesting model is untrusted: it can hallucinate file paths that were
//! never in the diff, or line numbers that refer to unchanged, removed or
//! non-existent lines. Screening classifies every record — it never discards
//! one and never raises: rejects are handed back so the dispatcher can demote
//! them into the report.

use ai_suggest::Suggestion;
use diff_index::BundleIndex;
use tracing::debug;

/// A suggestion whose `(file, line)` pair resolved in the index, carrying the
/// resolved anchor token. Only produced by [`screen_suggestions`].
#[derive(Debug, Clone)]
pub struct ValidatedSuggestion {
    pub file: String,
    pub line: u32,
    pub comment: String,
    pub anchor: String,
}

/// Why a suggestion was not promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A required field was missing or wrong-shaped.
    Malformed(&'static str),
    /// File or line not present in the line index.
    Unmapped,
}

/// A rejected suggestion with its original content kept for the report.
#[derive(Debug, Clone)]
pub struct RejectedSuggestion {
    pub file: String,
    pub line: i64,
    pub comment: String,
    pub reason: RejectReason,
}

/// Classification outcome for one suggestion, input order preserved.
#[derive(Debug, Clone)]
pub enum Screened {
    Valid(ValidatedSuggestion),
    Rejected(RejectedSuggestion),
}

/// Screens the whole suggestion sequence against the bundle index.
pub fn screen_suggestions(index: &BundleIndex, raw: Vec<Suggestion>) -> Vec<Screened> {
    let screened: Vec<Screened> = raw.into_iter().map(|s| screen_one(index, s)).collect();
    let valid = screened
        .iter()
        .filter(|s| matches!(s, Screened::Valid(_)))
        .count();
    debug!(
        "screen: {} valid, {} rejected",
        valid,
        screened.len() - valid
    );
    screened
}

fn screen_one(index: &BundleIndex, s: Suggestion) -> Screened {
    let file = s.file.unwrap_or_default();
    let line = s.line.unwrap_or(0);
    let comment = s.comment.unwrap_or_default();

    if file.trim().is_empty() {
        return rejected(file, line, comment, RejectReason::Malformed("missing file"));
    }
    if line <= 0 {
        return rejected(
            file,
            line,
            comment,
            RejectReason::Malformed("non-positive line"),
        );
    }
    if comment.trim().is_empty() {
        return rejected(file, line, comment, RejectReason::Malformed("empty comment"));
    }

    let Ok(new_line) = u32::try_from(line) else {
        return rejected(
            file,
            line,
            comment,
            RejectReason::Malformed("line out of range"),
        );
    };

    match index.resolve(&file, new_line) {
        Some(anchored) => Screened::Valid(ValidatedSuggestion {
            file,
            line: new_line,
            comment,
            anchor: anchored.anchor.clone(),
        }),
        None => rejected(file, line, comment, RejectReason::Unmapped),
    }
}

fn rejected(file: String, line: i64, comment: String, reason: RejectReason) -> Screened {
    let file = if file.trim().is_empty() {
        "<unknown>".to_string()
    } else {
        file
    };
    Screened::Rejected(RejectedSuggestion {
        file,
        line,
        comment,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diff_index::{DiffBundle, DiffRefs, FileChange, OLD_LINE_SENTINEL, line_anchor};

    fn index() -> BundleIndex {
        let bundle = DiffBundle {
            refs: DiffRefs {
                base_sha: "base".into(),
                start_sha: Some("start".into()),
                head_sha: "head".into(),
            },
            files: vec![FileChange {
                old_path: Some("x.ts".into()),
                new_path: Some("x.ts".into()),
                raw_diff: "@@ -10,3 +10,4 @@\n a\n+b\n c\n d\n".into(),
            }],
        };
        BundleIndex::build(&bundle)
    }

    fn suggestion(file: &str, line: i64, comment: &str) -> Suggestion {
        Suggestion {
            file: Some(file.to_string()),
            line: Some(line),
            comment: Some(comment.to_string()),
        }
    }

    #[test]
    fn indexed_line_is_accepted_with_its_anchor() {
        let out = screen_suggestions(&index(), vec![suggestion("x.ts", 11, "shorten this")]);
        match &out[0] {
            Screened::Valid(v) => {
                assert_eq!(v.file, "x.ts");
                assert_eq!(v.line, 11);
                assert_eq!(v.anchor, line_anchor("x.ts", OLD_LINE_SENTINEL, 11));
            }
            other => panic!("expected valid, got {other:?}"),
        }
    }

    #[test]
    fn unknown_file_is_unmapped() {
        let out = screen_suggestions(&index(), vec![suggestion("y.ts", 11, "c")]);
        match &out[0] {
            Screened::Rejected(r) => assert_eq!(r.reason, RejectReason::Unmapped),
            other => panic!("expected rejected, got {other:?}"),
        }
    }

    #[test]
    fn line_past_last_addressable_is_unmapped() {
        // Highest addressable new line in the fixture is 13.
        let out = screen_suggestions(&index(), vec![suggestion("x.ts", 14, "c")]);
        assert!(matches!(
            &out[0],
            Screened::Rejected(r) if r.reason == RejectReason::Unmapped
        ));
    }

    #[test]
    fn malformed_fields_are_classified_not_dropped() {
        let raw = vec![
            Suggestion {
                file: None,
                line: Some(11),
                comment: Some("c".into()),
            },
            suggestion("x.ts", 0, "c"),
            suggestion("x.ts", -3, "c"),
            suggestion("x.ts", 11, "   "),
        ];
        let out = screen_suggestions(&index(), raw);
        assert_eq!(out.len(), 4);
        for s in &out {
            assert!(matches!(
                s,
                Screened::Rejected(r) if matches!(r.reason, RejectReason::Malformed(_))
            ));
        }
        // Missing file gets a readable placeholder for the report.
        if let Screened::Rejected(r) = &out[0] {
            assert_eq!(r.file, "<unknown>");
        }
    }

    #[test]
    fn order_is_preserved() {
        let out = screen_suggestions(
            &index(),
            vec![
                suggestion("x.ts", 11, "first"),
                suggestion("y.ts", 1, "second"),
                suggestion("x.ts", 12, "third"),
            ],
        );
        assert!(matches!(&out[0], Screened::Valid(v) if v.comment == "first"));
        assert!(matches!(&out[1], Screened::Rejected(r) if r.comment == "second"));
        assert!(matches!(&out[2], Screened::Valid(v) if v.comment == "third"));
    }
}
