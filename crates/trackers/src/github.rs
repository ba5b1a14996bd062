//! GitHub issue creation via the REST API.
//!
//! `POST {api_url}/repos/{owner}/{repo}/issues` with a personal access token.
//! The created issue's `html_url` becomes [`CreatedIssue::html_url`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Serialize;

use bugrelay_core::issue::{CreatedIssue, NewIssue};
use bugrelay_core::repository::RepositoryTarget;

use crate::error::{ensure_success, TrackerError};
use crate::{required_str, IssueTracker};

/// Public GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PROVIDER: &str = "GitHub";

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
}

/// Opens issues on GitHub (or a GitHub-compatible API at `api_url`).
pub struct GitHubTracker {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubTracker {
    /// Tracker for the public GitHub API.
    pub fn new(client: reqwest::Client, token: impl Into<String>) -> Self {
        Self::with_api_url(client, DEFAULT_API_URL, token)
    }

    /// Tracker for an arbitrary API base URL (GitHub Enterprise, tests).
    pub fn with_api_url(
        client: reqwest::Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_url,
            token: token.into(),
        }
    }

    fn issues_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}/issues", self.api_url)
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        let RepositoryTarget::GitHub { owner, repo } = &issue.target else {
            return Err(TrackerError::UnsupportedTarget {
                provider: PROVIDER,
                kind: issue.target.kind(),
            });
        };

        let response = self
            .client
            .post(self.issues_url(owner, repo))
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, crate::USER_AGENT)
            .json(&CreateIssueRequest {
                title: &issue.title,
                body: &issue.body,
            })
            .send()
            .await?;

        let raw: serde_json::Value = ensure_success(PROVIDER, response).await?.json().await?;
        let html_url = required_str(&raw, PROVIDER, "html_url")?;

        tracing::info!(owner = %owner, repo = %repo, %html_url, "GitHub issue created");

        Ok(CreatedIssue { html_url, raw })
    }
}
