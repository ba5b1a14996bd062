//! Repository URL classification.
//!
//! Decides which issue tracker a report goes to. GitLab URLs are passed
//! through untouched because the game client already builds the complete
//! API request URL (including `title`/`description` query parameters).
//! GitHub URLs are reduced to an owner/repository pair.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// Substring that marks a URL as belonging to GitLab.
pub const GITLAB_MARKER: &str = "gitlab";

/// `github.com/[repos/]<owner>/<repo>`.
///
/// Owner and repository are limited to ASCII letters, digits and `-`.
/// Names containing `.` or `_` are not recognised.
const GITHUB_PATTERN: &str = r"github\.com/(?:repos/)?([A-Za-z0-9-]+)/([A-Za-z0-9-]+)";

static GITHUB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GITHUB_PATTERN).expect("valid regex"));

/// Where a report should be filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RepositoryTarget {
    GitHub { owner: String, repo: String },
    GitLab { url: String },
}

impl RepositoryTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryTarget::GitHub { .. } => "github",
            RepositoryTarget::GitLab { .. } => "gitlab",
        }
    }
}

/// Classify a repository URL as GitHub or GitLab.
///
/// Returns [`CoreError::InvalidRepositoryUrl`] carrying the original string
/// when it matches neither provider.
pub fn classify(repository_url: &str) -> Result<RepositoryTarget, CoreError> {
    if repository_url.contains(GITLAB_MARKER) {
        return Ok(RepositoryTarget::GitLab {
            url: repository_url.to_string(),
        });
    }

    let captures = GITHUB_RE
        .captures(repository_url)
        .ok_or_else(|| CoreError::InvalidRepositoryUrl(repository_url.to_string()))?;

    match (captures.get(1), captures.get(2)) {
        (Some(owner), Some(repo)) => Ok(RepositoryTarget::GitHub {
            owner: owner.as_str().to_string(),
            repo: repo.as_str().to_string(),
        }),
        _ => Err(CoreError::InvalidRepositoryUrl(repository_url.to_string())),
    }
}
