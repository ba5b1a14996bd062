pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Path used by already deployed game clients.
pub const LEGACY_REPORT_PATH: &str = "/api/ReportBugFunction";

/// Build the `/api/v1` route tree.
///
/// ```text
/// /bug-reports          submit a bug report (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/bug-reports", post(handlers::bug_reports::submit_bug_report))
}

/// Root-level alias of the submit endpoint for existing clients.
pub fn legacy_routes() -> Router<AppState> {
    Router::new().route(
        LEGACY_REPORT_PATH,
        post(handlers::bug_reports::submit_bug_report),
    )
}
