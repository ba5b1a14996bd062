#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bugrelay_api::config::{ModerationConfig, ServerConfig};
use bugrelay_api::router::build_app_router;
use bugrelay_api::state::{AppState, Trackers};
use bugrelay_core::issue::{CreatedIssue, NewIssue};
use bugrelay_core::moderation::ModerationVerdict;
use bugrelay_core::repository::RepositoryTarget;
use bugrelay_trackers::{ContentModerator, IssueTracker, ModerationError, TrackerError};

/// Build a test `ServerConfig` with safe defaults and dummy secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        moderation: ModerationConfig {
            endpoint: "http://moderation.invalid".to_string(),
            api_key: "test-key".to_string(),
        },
        github_api_url: "http://github.invalid".to_string(),
        github_token: "test-pat".to_string(),
        gitlab_token: "test-gitlab".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Moderator returning a fixed verdict (or an error) and recording the text.
pub struct FakeModerator {
    verdict: Option<Value>,
    pub screened: Mutex<Vec<String>>,
}

impl FakeModerator {
    pub fn with_verdict(verdict: Value) -> Arc<Self> {
        Arc::new(Self {
            verdict: Some(verdict),
            screened: Mutex::new(Vec::new()),
        })
    }

    pub fn passing() -> Arc<Self> {
        Self::with_verdict(json!({ "Classification": { "ReviewRecommended": false } }))
    }

    pub fn flagging() -> Arc<Self> {
        Self::with_verdict(json!({
            "Classification": { "ReviewRecommended": true, "Category3": { "Score": 0.98 } },
            "Language": "eng"
        }))
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            verdict: None,
            screened: Mutex::new(Vec::new()),
        })
    }

    pub fn screened(&self) -> Vec<String> {
        self.screened.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentModerator for FakeModerator {
    async fn screen(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        self.screened.lock().unwrap().push(text.to_string());
        match &self.verdict {
            Some(raw) => Ok(ModerationVerdict::from_raw(raw.clone())),
            None => Err(ModerationError::Status {
                status: 503,
                body: "moderation down".to_string(),
            }),
        }
    }
}

/// Tracker that records every issue and answers with a fixed outcome.
pub struct FakeTracker {
    name: &'static str,
    fail: bool,
    pub issues: Mutex<Vec<NewIssue>>,
}

impl FakeTracker {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail: false,
            issues: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail: true,
            issues: Mutex::new(Vec::new()),
        })
    }

    pub fn issues(&self) -> Vec<NewIssue> {
        self.issues.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        self.issues.lock().unwrap().push(issue.clone());
        if self.fail {
            return Err(TrackerError::Status {
                provider: self.name,
                status: 502,
                reason: "Bad Gateway".to_string(),
                body: "secret upstream stack trace".to_string(),
            });
        }
        let html_url = format!("https://{}.example/issues/1", self.name.to_lowercase());
        let raw = match issue.target {
            RepositoryTarget::GitHub { .. } => json!({ "id": 1, "html_url": html_url }),
            RepositoryTarget::GitLab { .. } => json!({ "iid": 1, "web_url": html_url }),
        };
        Ok(CreatedIssue { html_url, raw })
    }
}

/// Fakes wired into a router.
pub struct TestApp {
    pub router: Router,
    pub moderator: Arc<FakeModerator>,
    pub github: Arc<FakeTracker>,
    pub gitlab: Arc<FakeTracker>,
}

/// Build the full application router around the given fakes.
pub fn build_test_app_with(
    moderator: Arc<FakeModerator>,
    github: Arc<FakeTracker>,
    gitlab: Arc<FakeTracker>,
) -> TestApp {
    let config = test_config();
    let state = AppState {
        moderator: moderator.clone(),
        trackers: Trackers {
            github: github.clone(),
            gitlab: gitlab.clone(),
        },
    };

    TestApp {
        router: build_app_router(state, &config),
        moderator,
        github,
        gitlab,
    }
}

/// Router with a passing moderator and succeeding trackers.
pub fn build_test_app() -> TestApp {
    build_test_app_with(
        FakeModerator::passing(),
        FakeTracker::new("GitHub"),
        FakeTracker::new("GitLab"),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
