use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bugrelay_core::error::CoreError;
use bugrelay_core::moderation::ModerationVerdict;
use bugrelay_trackers::{ModerationError, TrackerError};

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce a `{ "kind": ..., "message": ... }`
/// JSON envelope. Upstream failures are logged in full and reported to the
/// client with an opaque message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `bugrelay_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The moderation service recommended review of the submitted text.
    #[error("Report was flagged by content moderation")]
    ModerationRejected(ModerationVerdict),

    /// The moderation service could not be reached or answered with an error.
    #[error("Moderation failed: {0}")]
    Moderation(#[from] ModerationError),

    /// The issue tracker call failed.
    #[error("Issue tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// A request body that could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::InvalidRepositoryUrl(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            AppError::ModerationRejected(verdict) => {
                let body = json!({
                    "kind": "MODERATION_REJECTED",
                    "message": self.to_string(),
                    "verdict": verdict.raw(),
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            AppError::Moderation(err) => {
                tracing::error!(error = %err, "Content moderation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODERATION_UNAVAILABLE",
                    "Content moderation is unavailable".to_string(),
                )
            }

            AppError::Tracker(err) => {
                tracing::error!(error = %err, "Issue creation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROVIDER_ERROR",
                    "Failed to create issue".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "kind": kind,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
