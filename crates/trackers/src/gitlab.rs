//! GitLab issue creation.
//!
//! The game client builds the whole request URL, for example
//! `https://gitlab.com/api/v4/projects/<id>/issues?title=...&description=...`,
//! so this tracker only POSTs to it with an empty body and a private token.
//! The response's `web_url` becomes [`CreatedIssue::html_url`].

use async_trait::async_trait;
use reqwest::header::USER_AGENT;

use bugrelay_core::issue::{CreatedIssue, NewIssue};
use bugrelay_core::repository::RepositoryTarget;

use crate::error::{ensure_success, TrackerError};
use crate::{required_str, IssueTracker};

const PROVIDER: &str = "GitLab";

/// GitLab's personal access token header.
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

pub struct GitLabTracker {
    client: reqwest::Client,
    token: String,
}

impl GitLabTracker {
    pub fn new(client: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }
}

#[async_trait]
impl IssueTracker for GitLabTracker {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        let RepositoryTarget::GitLab { url } = &issue.target else {
            return Err(TrackerError::UnsupportedTarget {
                provider: PROVIDER,
                kind: issue.target.kind(),
            });
        };

        let response = self
            .client
            .post(url.as_str())
            .header(PRIVATE_TOKEN_HEADER, &self.token)
            .header(USER_AGENT, crate::USER_AGENT)
            .send()
            .await?;

        let raw: serde_json::Value = ensure_success(PROVIDER, response).await?.json().await?;
        let html_url = required_str(&raw, PROVIDER, "web_url")?;

        tracing::info!(%html_url, "GitLab issue created");

        Ok(CreatedIssue { html_url, raw })
    }
}
