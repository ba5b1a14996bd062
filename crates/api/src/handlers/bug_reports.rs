//! Handler for relaying bug reports to issue trackers.
//!
//! Per request: moderate the submitted text, classify the repository URL,
//! compose the issue body and hand the issue to the matching tracker.
//! Nothing is stored and no upstream call is retried.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use bugrelay_core::issue::NewIssue;
use bugrelay_core::issue_body::{
    compose_issue_body, is_module_list_fragment, is_module_settings_fragment, GITHUB_BODY_LIMIT,
};
use bugrelay_core::moderation::moderation_text;
use bugrelay_core::report::BugReport;
use bugrelay_core::repository::classify;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /bug-reports
// ---------------------------------------------------------------------------

/// Relay a bug report to the GitHub or GitLab repository it names.
///
/// - 201 with the created issue (`htmlUrl`, `raw`).
/// - 400 when the payload or repository URL is invalid, or when moderation
///   recommends review (the verdict is echoed back).
/// - 500 when moderation or the tracker call fails.
pub async fn submit_bug_report(
    State(state): State<AppState>,
    payload: Result<Json<BugReport>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(report) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    report.validate()?;

    let verdict = state.moderator.screen(&moderation_text(&report)).await?;
    if verdict.requires_review() {
        tracing::warn!(
            repo = %report.repository_url,
            "Bug report rejected by content moderation"
        );
        return Err(AppError::ModerationRejected(verdict));
    }

    let target = classify(&report.repository_url)?;

    log_dropped_fragments(&report);
    let body = compose_issue_body(&report);
    if body.chars().count() > GITHUB_BODY_LIMIT {
        tracing::warn!(
            length = body.chars().count(),
            limit = GITHUB_BODY_LIMIT,
            "Composed issue body exceeds the tracker limit"
        );
    }

    let tracker = state.trackers.for_target(&target);
    tracing::debug!(provider = tracker.name(), kind = target.kind(), "Routing bug report");

    let issue = NewIssue {
        target,
        title: report.title,
        body,
    };
    let created = tracker.create_issue(&issue).await?;

    tracing::info!(
        provider = tracker.name(),
        html_url = %created.html_url,
        "Bug report relayed"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Fragments that break their `<details>` wrapping rule are left out of the
/// body; note that at debug level.
fn log_dropped_fragments(report: &BugReport) {
    if let Some(html) = report.module_settings_html.as_deref() {
        if !html.is_empty() && !is_module_settings_fragment(html) {
            tracing::debug!("Ignoring malformed module settings fragment");
        }
    }
    if let Some(html) = report.module_list_html.as_deref() {
        if !html.is_empty() && !is_module_list_fragment(html) {
            tracing::debug!("Ignoring malformed module list fragment");
        }
    }
}
