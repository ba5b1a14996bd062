//! Outbound clients used by the bug report relay.
//!
//! - [`moderator::AzureContentModerator`] screens report text.
//! - [`github::GitHubTracker`] opens issues through the GitHub REST API.
//! - [`gitlab::GitLabTracker`] posts to a caller-built GitLab issues URL.
//!
//! All clients share one [`reqwest::Client`] handed in by the caller.

use async_trait::async_trait;

use bugrelay_core::issue::{CreatedIssue, NewIssue};
use bugrelay_core::moderation::ModerationVerdict;

pub mod error;
pub mod github;
pub mod gitlab;
pub mod moderator;

pub use error::{ModerationError, TrackerError};

/// User agent sent with every outbound request.
pub const USER_AGENT: &str = "foundryvtt-bug-reporter";

/// An issue tracker that can open issues.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Open an issue. Called exactly once per report; never retried.
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError>;
}

/// A text moderation service.
#[async_trait]
pub trait ContentModerator: Send + Sync {
    async fn screen(&self, text: &str) -> Result<ModerationVerdict, ModerationError>;
}

/// Read a string field from a provider response.
pub(crate) fn required_str(
    raw: &serde_json::Value,
    provider: &'static str,
    field: &'static str,
) -> Result<String, TrackerError> {
    raw.get(field)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(TrackerError::MissingField { provider, field })
}
