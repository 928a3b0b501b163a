//! Review pipeline for one merge request event.
//!
//! Single high-level entry to run the whole flow:
//!
//! 1) **Fetch** — MR metadata (diff refs) and per-file diffs → `DiffBundle`
//! 2) **Index** — parse hunks and build the per-file line index (pure)
//! 3) **Suggest** — send the concatenated diff to the model, decode records
//! 4) **Screen** — validate suggestions against the index
//! 5) **Place** — fan out anchored placements, demote failures, post one
//!    aggregate summary note
//!
//! The bundle and index live for exactly one event; nothing is shared across
//! events. Uses `tracing` for per-step debug logging and avoids `async-trait`
//! and heap trait objects.

pub mod dispatch;
pub mod errors;
pub mod host;
pub mod summary;
pub mod validate;

use std::time::Instant;

use ai_suggest::SuggestClient;
use diff_index::{BundleIndex, DiffBundle};
use gitlab_client::{GitLabClient, MrId};
use tracing::{debug, info};

use dispatch::{DispatchConfig, Dispatcher};
use errors::FlowResult;
use host::GitLabMrHost;
use summary::Summary;

pub use dispatch::DispatchConfig as ReviewDispatchConfig;
pub use summary::Summary as ReviewSummary;

/// Runs the full review flow for one MR and returns the posted summary.
///
/// Exactly one summary note is posted per call, even when some or all
/// placements fail. Upstream failures (fetch, model call) abort before any
/// side effect.
pub async fn run_review(
    gitlab: &GitLabClient,
    suggester: &SuggestClient,
    id: &MrId,
    cfg: DispatchConfig,
) -> FlowResult<Summary> {
    let t0 = Instant::now();
    debug!("step1: fetch MR meta for !{}", id.iid);
    let meta = gitlab.get_meta(id).await?;
    debug!("step1: fetch diffs");
    let files = gitlab.get_diff_files(id).await?;
    let bundle = DiffBundle {
        refs: meta.diff_refs,
        files,
    };
    debug!(
        "step1: bundle ready, files={} ({} ms)",
        bundle.files.len(),
        t0.elapsed().as_millis()
    );

    let t2 = Instant::now();
    let index = BundleIndex::build(&bundle);
    debug!(
        "step2: line index built, files={} addressable={} ({} ms)",
        index.file_count(),
        index.line_count(),
        t2.elapsed().as_millis()
    );

    let t3 = Instant::now();
    let raw = suggester
        .generate_suggestions(&bundle.concatenated_diff())
        .await?;
    debug!(
        "step3: {} suggestion(s) ({} ms)",
        raw.len(),
        t3.elapsed().as_millis()
    );

    let screened = validate::screen_suggestions(&index, raw);

    let host = GitLabMrHost::new(gitlab.clone(), id.clone());
    let dispatcher = Dispatcher::new(host, cfg);
    let summary = dispatcher.place_all(&bundle.refs, screened).await;
    dispatcher.post_summary(&summary).await?;

    info!(
        "review !{} done: placed={} demoted={} in {} ms",
        id.iid,
        summary.placed,
        summary.demoted.len(),
        t0.elapsed().as_millis()
    );
    Ok(summary)
}
