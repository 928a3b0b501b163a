//! Aggregate report for one review event.
//!
//! Exactly one summary is produced per event, whatever happened to the
//! individual placements: failures are absorbed into informative text, never
//! left as a silent gap.

use std::fmt;

use crate::validate::RejectReason;

/// Why a suggestion ended up in the demoted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoteReason {
    /// File or line was not found in the diff line index.
    Unmapped,
    /// A required field was missing or wrong-shaped.
    Malformed(&'static str),
    /// The placement call was attempted and failed.
    Placement(String),
}

impl From<RejectReason> for DemoteReason {
    fn from(r: RejectReason) -> Self {
        match r {
            RejectReason::Unmapped => DemoteReason::Unmapped,
            RejectReason::Malformed(detail) => DemoteReason::Malformed(detail),
        }
    }
}

impl fmt::Display for DemoteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoteReason::Unmapped => write!(f, "unmapped reference"),
            DemoteReason::Malformed(detail) => write!(f, "malformed suggestion: {detail}"),
            DemoteReason::Placement(e) => write!(f, "placement failed: {e}"),
        }
    }
}

/// One suggestion that could not be placed, original content verbatim.
#[derive(Debug, Clone)]
pub struct DemotedEntry {
    pub file: String,
    pub line: i64,
    pub comment: String,
    pub reason: DemoteReason,
}

/// Per-event aggregate: how many comments were placed, and everything that
/// was demoted, in input order.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Number of suggestions that entered dispatch (0 = none were produced).
    pub total: usize,
    pub placed: usize,
    pub demoted: Vec<DemotedEntry>,
}

impl Summary {
    /// The "no relevant findings" end state — distinct from a summary where
    /// every suggestion was demoted.
    pub fn no_suggestions() -> Self {
        Self {
            total: 0,
            placed: 0,
            demoted: Vec::new(),
        }
    }

    /// Renders the summary note body.
    pub fn render(&self) -> String {
        let mut out = String::from("**Automated review**\n\n");
        if self.total == 0 {
            out.push_str("No relevant findings.");
            return out;
        }
        out.push_str(&format!("{} inline comment(s) placed.", self.placed));
        if !self.demoted.is_empty() {
            out.push_str(&format!(
                "\n\n{} suggestion(s) could not be anchored:\n",
                self.demoted.len()
            ));
            for d in &self.demoted {
                out.push_str(&format!(
                    "\n- ({}:{}) — {} _({})_",
                    d.file, d.line, d.comment, d.reason
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_reads_differently_from_all_demoted() {
        let empty = Summary::no_suggestions().render();
        let all_demoted = Summary {
            total: 1,
            placed: 0,
            demoted: vec![DemotedEntry {
                file: "a.ts".into(),
                line: 3,
                comment: "tighten".into(),
                reason: DemoteReason::Unmapped,
            }],
        }
        .render();

        assert!(empty.contains("No relevant findings"));
        assert!(!all_demoted.contains("No relevant findings"));
        assert!(all_demoted.contains("0 inline comment(s) placed"));
        assert_ne!(empty, all_demoted);
    }

    #[test]
    fn demoted_entries_keep_file_line_and_comment_verbatim() {
        let body = Summary {
            total: 2,
            placed: 1,
            demoted: vec![DemotedEntry {
                file: "src/x.ts".into(),
                line: 42,
                comment: "Consider a guard clause here".into(),
                reason: DemoteReason::Placement("rejected: status=400".into()),
            }],
        }
        .render();

        assert!(body.contains("(src/x.ts:42) — Consider a guard clause here"));
        assert!(body.contains("placement failed"));
    }

    #[test]
    fn reason_texts_are_distinguishable() {
        assert_eq!(DemoteReason::Unmapped.to_string(), "unmapped reference");
        assert!(
            DemoteReason::Malformed("missing file")
                .to_string()
                .contains("missing file")
        );
        assert!(
            DemoteReason::Placement("timeout".into())
                .to_string()
                .starts_with("placement failed")
        );
    }
}
