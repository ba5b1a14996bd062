use std::sync::Arc;

use bugrelay_core::repository::RepositoryTarget;
use bugrelay_trackers::github::GitHubTracker;
use bugrelay_trackers::gitlab::GitLabTracker;
use bugrelay_trackers::moderator::AzureContentModerator;
use bugrelay_trackers::{ContentModerator, IssueTracker};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Screens report text before anything is forwarded.
    pub moderator: Arc<dyn ContentModerator>,
    pub trackers: Trackers,
}

/// One tracker per supported provider.
#[derive(Clone)]
pub struct Trackers {
    pub github: Arc<dyn IssueTracker>,
    pub gitlab: Arc<dyn IssueTracker>,
}

impl Trackers {
    /// The tracker responsible for `target`.
    pub fn for_target(&self, target: &RepositoryTarget) -> &Arc<dyn IssueTracker> {
        match target {
            RepositoryTarget::GitHub { .. } => &self.github,
            RepositoryTarget::GitLab { .. } => &self.gitlab,
        }
    }
}

impl AppState {
    /// Build the production state. `client` is shared by the moderator and
    /// both trackers; the config is only read for endpoints and secrets.
    pub fn new(config: &ServerConfig, client: reqwest::Client) -> Self {
        let moderator = AzureContentModerator::new(
            client.clone(),
            config.moderation.endpoint.clone(),
            config.moderation.api_key.clone(),
        );
        let github = GitHubTracker::with_api_url(
            client.clone(),
            config.github_api_url.clone(),
            config.github_token.clone(),
        );
        let gitlab = GitLabTracker::new(client, config.gitlab_token.clone());

        Self {
            moderator: Arc::new(moderator),
            trackers: Trackers {
                github: Arc::new(github),
                gitlab: Arc::new(gitlab),
            },
        }
    }
}
