use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use ai_suggest::SuggestClient;
use gitlab_client::{GitLabClient, MrId};
use review_publisher::run_review;
use tracing::{error, info};

use crate::core::app_state::AppState;
use crate::routes::webhook::webhook_payload::WebhookEvent;

/// POST /webhook
///
/// Receives GitLab webhook events. Merge request events run the review
/// pipeline; the response is sent after exactly one summary note was posted.
/// Unsupported event kinds are acknowledged with 200 so GitLab does not
/// retry them.
pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(event): Json<WebhookEvent>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    let token = headers
        .get("x-gitlab-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if token != state.webhook_secret {
        return Err((StatusCode::UNAUTHORIZED, "invalid webhook token".into()));
    }

    if event.object_kind != "merge_request" {
        return Ok((StatusCode::OK, "unsupported event".into()));
    }

    let (Some(project), Some(attrs)) = (event.project, event.object_attributes) else {
        return Err((
            StatusCode::BAD_REQUEST,
            "merge_request event without project/object_attributes".into(),
        ));
    };

    info!(
        "merge request event: !{} in {} (action={})",
        attrs.iid,
        project.name.as_deref().unwrap_or("?"),
        attrs.action.as_deref().unwrap_or("?")
    );

    let gitlab = GitLabClient::new(state.gitlab.clone())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("gitlab client: {e}")))?;
    let suggester = SuggestClient::new(state.suggest.clone())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("llm client: {e}")))?;

    let id = MrId {
        project: project.id.to_string(),
        iid: attrs.iid,
    };

    match run_review(&gitlab, &suggester, &id, state.dispatch.clone()).await {
        Ok(summary) => Ok((
            StatusCode::OK,
            format!(
                "placed {} comment(s), demoted {}",
                summary.placed,
                summary.demoted.len()
            ),
        )),
        Err(e) => {
            error!("review of !{} failed: {e}", id.iid);
            Err((StatusCode::BAD_GATEWAY, format!("review error: {e}")))
        }
    }
}
