//! Placement dispatcher.
//!
//! Per suggestion: `Pending → {Placed | Demoted}`. Validated suggestions are
//! placed through the host with bounded fan-out (`tokio::spawn` behind a
//! semaphore); the summary is assembled by awaiting the slots in input order,
//! so the report is deterministic regardless of completion order. Per-item
//! failure demotes that item and never aborts the rest; no suggestion is
//! attempted twice.

use std::sync::Arc;

use diff_index::DiffRefs;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::host::{CommentHost, HostError, InlinePlacement};
use crate::summary::{DemoteReason, DemotedEntry, Summary};
use crate::validate::{Screened, ValidatedSuggestion};

/// Dispatch configuration.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Concurrency bound for placement requests.
    pub max_concurrency: usize,
    /// If true, do not call the host; log what would be posted.
    pub dry_run: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: env_usize("PLACE_CONCURRENCY", 2),
            dry_run: env_bool("PLACE_DRY_RUN", false),
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Drives placements for one event through a `CommentHost`.
///
/// Host and configuration are explicit constructor inputs, so the dispatcher
/// runs against a fake host in tests.
pub struct Dispatcher<H: CommentHost> {
    host: H,
    cfg: DispatchConfig,
}

enum Slot {
    Demoted(DemotedEntry),
    InFlight {
        vs: ValidatedSuggestion,
        task: JoinHandle<Result<(), HostError>>,
    },
    DryRun,
}

impl<H: CommentHost> Dispatcher<H> {
    pub fn new(host: H, cfg: DispatchConfig) -> Self {
        Self { host, cfg }
    }

    /// Attempts every placement and aggregates one [`Summary`].
    ///
    /// Placements start in input order; demotions keep input order in the
    /// report. An empty sequence short-circuits to the "no suggestions"
    /// summary.
    pub async fn place_all(&self, refs: &DiffRefs, screened: Vec<Screened>) -> Summary {
        let total = screened.len();
        if total == 0 {
            return Summary::no_suggestions();
        }

        let sem = Arc::new(Semaphore::new(self.cfg.max_concurrency.max(1)));

        let mut slots: Vec<Slot> = Vec::with_capacity(total);
        for item in screened {
            match item {
                Screened::Rejected(r) => {
                    slots.push(Slot::Demoted(DemotedEntry {
                        file: r.file,
                        line: r.line,
                        comment: r.comment,
                        reason: r.reason.into(),
                    }));
                }
                Screened::Valid(vs) => {
                    if self.cfg.dry_run {
                        debug!("dispatch: dry-run skip {}:{}", vs.file, vs.line);
                        slots.push(Slot::DryRun);
                        continue;
                    }
                    let host = self.host.clone();
                    let sem = sem.clone();
                    let req = InlinePlacement {
                        path: vs.file.clone(),
                        line: vs.line,
                        anchor: vs.anchor.clone(),
                        body: vs.comment.clone(),
                        refs: refs.clone(),
                    };
                    let task = tokio::spawn(async move {
                        let _permit = sem
                            .acquire_owned()
                            .await
                            .map_err(|_| HostError("placement pool closed".into()))?;
                        host.place_inline(req).await
                    });
                    slots.push(Slot::InFlight { vs, task });
                }
            }
        }

        let mut placed = 0usize;
        let mut demoted = Vec::new();
        for slot in slots {
            match slot {
                Slot::DryRun => placed += 1,
                Slot::Demoted(d) => demoted.push(d),
                Slot::InFlight { vs, task } => match task.await {
                    Ok(Ok(())) => placed += 1,
                    Ok(Err(e)) => demoted.push(demote(vs, DemoteReason::Placement(e.to_string()))),
                    Err(e) => demoted.push(demote(
                        vs,
                        DemoteReason::Placement(format!("join error: {e}")),
                    )),
                },
            }
        }

        info!(
            "dispatch: placed={} demoted={} of {}",
            placed,
            demoted.len(),
            total
        );
        Summary {
            total,
            placed,
            demoted,
        }
    }

    /// Posts the aggregate summary as one plain note.
    pub async fn post_summary(&self, summary: &Summary) -> Result<(), HostError> {
        let body = summary.render();
        if self.cfg.dry_run {
            info!("dispatch: dry-run summary:\n{}", body);
            return Ok(());
        }
        self.host.post_note(body).await
    }
}

fn demote(vs: ValidatedSuggestion, reason: DemoteReason) -> DemotedEntry {
    DemotedEntry {
        file: vs.file,
        line: vs.line as i64,
        comment: vs.comment,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{RejectReason, RejectedSuggestion};
    use std::collections::HashSet;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct FakeHost {
        fail_paths: Arc<HashSet<String>>,
        placed: Arc<Mutex<Vec<InlinePlacement>>>,
        notes: Arc<Mutex<Vec<String>>>,
    }

    impl CommentHost for FakeHost {
        fn place_inline(
            &self,
            req: InlinePlacement,
        ) -> impl Future<Output = Result<(), HostError>> + Send {
            async move {
                if self.fail_paths.contains(&req.path) {
                    return Err(HostError("rejected: status=400".into()));
                }
                self.placed.lock().unwrap().push(req);
                Ok(())
            }
        }

        fn post_note(&self, body: String) -> impl Future<Output = Result<(), HostError>> + Send {
            async move {
                self.notes.lock().unwrap().push(body);
                Ok(())
            }
        }
    }

    fn refs() -> DiffRefs {
        DiffRefs {
            base_sha: "base".into(),
            start_sha: Some("start".into()),
            head_sha: "head".into(),
        }
    }

    fn valid(file: &str, line: u32, comment: &str) -> Screened {
        Screened::Valid(ValidatedSuggestion {
            file: file.to_string(),
            line,
            comment: comment.to_string(),
            anchor: format!("deadbeef-0-{line}"),
        })
    }

    fn cfg() -> DispatchConfig {
        DispatchConfig {
            max_concurrency: 4,
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn empty_sequence_yields_no_suggestions_summary() {
        let dispatcher = Dispatcher::new(FakeHost::default(), cfg());
        let summary = dispatcher.place_all(&refs(), Vec::new()).await;
        assert_eq!(summary.total, 0);
        assert_eq!(summary.placed, 0);
        assert!(summary.demoted.is_empty());
        assert!(summary.render().contains("No relevant findings"));
    }

    #[tokio::test]
    async fn failed_placement_is_demoted_with_comment_verbatim() {
        let host = FakeHost {
            fail_paths: Arc::new(HashSet::from(["x.ts".to_string()])),
            ..Default::default()
        };
        let dispatcher = Dispatcher::new(host.clone(), cfg());
        let summary = dispatcher
            .place_all(&refs(), vec![valid("x.ts", 11, "Use a descriptive name")])
            .await;

        assert_eq!(summary.placed, 0);
        assert_eq!(summary.demoted.len(), 1);
        assert_eq!(summary.demoted[0].comment, "Use a descriptive name");
        assert!(matches!(
            summary.demoted[0].reason,
            DemoteReason::Placement(_)
        ));
        assert!(host.placed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn report_keeps_input_order_under_concurrency() {
        let host = FakeHost {
            fail_paths: Arc::new(HashSet::from(["b.ts".to_string(), "d.ts".to_string()])),
            ..Default::default()
        };
        let dispatcher = Dispatcher::new(host.clone(), cfg());
        let screened = vec![
            valid("a.ts", 1, "first"),
            valid("b.ts", 2, "second"),
            Screened::Rejected(RejectedSuggestion {
                file: "zz.ts".into(),
                line: 9,
                comment: "third".into(),
                reason: RejectReason::Unmapped,
            }),
            valid("c.ts", 3, "fourth"),
            valid("d.ts", 4, "fifth"),
        ];
        let summary = dispatcher.place_all(&refs(), screened).await;

        assert_eq!(summary.total, 5);
        assert_eq!(summary.placed, 2);
        let demoted: Vec<&str> = summary.demoted.iter().map(|d| d.comment.as_str()).collect();
        assert_eq!(demoted, vec!["second", "third", "fifth"]);
        assert_eq!(summary.demoted[1].reason, DemoteReason::Unmapped);
    }

    #[tokio::test]
    async fn placements_carry_anchor_and_refs() {
        let host = FakeHost::default();
        let dispatcher = Dispatcher::new(host.clone(), cfg());
        dispatcher
            .place_all(&refs(), vec![valid("a.ts", 7, "note")])
            .await;

        let placed = host.placed.lock().unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].anchor, "deadbeef-0-7");
        assert_eq!(placed[0].refs.head_sha, "head");
    }

    #[tokio::test]
    async fn post_summary_writes_one_note() {
        let host = FakeHost::default();
        let dispatcher = Dispatcher::new(host.clone(), cfg());
        let summary = dispatcher.place_all(&refs(), Vec::new()).await;
        dispatcher.post_summary(&summary).await.unwrap();

        let notes = host.notes.lock().unwrap();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("No relevant findings"));
    }

    #[tokio::test]
    async fn dry_run_counts_without_calling_the_host() {
        let host = FakeHost::default();
        let dispatcher = Dispatcher::new(
            host.clone(),
            DispatchConfig {
                max_concurrency: 2,
                dry_run: true,
            },
        );
        let summary = dispatcher
            .place_all(&refs(), vec![valid("a.ts", 1, "x")])
            .await;
        dispatcher.post_summary(&summary).await.unwrap();

        assert_eq!(summary.placed, 1);
        assert!(host.placed.lock().unwrap().is_empty());
        assert!(host.notes.lock().unwrap().is_empty());
    }
}
