//! Azure Content Moderator text screening.
//!
//! Calls `ProcessText/Screen` with the report text as `text/plain`,
//! English language, classification on and auto-correction off.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use bugrelay_core::moderation::ModerationVerdict;

use crate::error::{check_response, ModerationError};
use crate::ContentModerator;

const SCREEN_PATH: &str = "/contentmoderator/moderate/v1.0/ProcessText/Screen";

/// Azure API key header.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Language code sent with every screening request.
pub const LANGUAGE: &str = "eng";

pub struct AzureContentModerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AzureContentModerator {
    /// * `endpoint` - Resource endpoint, e.g. `https://<name>.cognitiveservices.azure.com`.
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            client,
            endpoint,
            api_key: api_key.into(),
        }
    }

    fn screen_url(&self) -> String {
        format!("{}{SCREEN_PATH}", self.endpoint)
    }
}

#[async_trait]
impl ContentModerator for AzureContentModerator {
    async fn screen(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        let response = self
            .client
            .post(self.screen_url())
            .query(&[
                ("autocorrect", "false"),
                ("PII", "false"),
                ("classify", "True"),
                ("language", LANGUAGE),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "text/plain")
            .header(USER_AGENT, crate::USER_AGENT)
            .body(text.to_owned())
            .send()
            .await?;

        let response = check_response(response).await?;
        let verdict = ModerationVerdict::from_raw(response.json().await?);
        tracing::debug!(
            review_recommended = ?verdict.review_recommended(),
            "Moderation verdict received"
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn screens_text_with_expected_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SCREEN_PATH))
            .and(query_param("language", "eng"))
            .and(query_param("autocorrect", "false"))
            .and(query_param("classify", "True"))
            .and(header(SUBSCRIPTION_KEY_HEADER, "key-1"))
            .and(header("content-type", "text/plain"))
            .and(body_string("Broken It crashes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Classification": { "ReviewRecommended": false },
                "Language": "eng"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let moderator = AzureContentModerator::new(reqwest::Client::new(), server.uri(), "key-1");
        let verdict = moderator.screen("Broken It crashes").await.unwrap();

        assert_eq!(verdict.review_recommended(), Some(false));
        assert_eq!(verdict.raw()["Language"], "eng");
    }

    #[tokio::test]
    async fn flagged_text_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Classification": { "ReviewRecommended": true }
            })))
            .mount(&server)
            .await;

        let moderator = AzureContentModerator::new(reqwest::Client::new(), server.uri(), "k");
        assert!(moderator.screen("bad words").await.unwrap().requires_review());
    }

    #[tokio::test]
    async fn service_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Access denied"))
            .mount(&server)
            .await;

        let moderator = AzureContentModerator::new(reqwest::Client::new(), server.uri(), "k");
        let err = moderator.screen("text").await.unwrap_err();

        assert_matches!(err, ModerationError::Status { status: 401, .. });
    }

    #[tokio::test]
    async fn service_error_keeps_upstream_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("throttled"))
            .mount(&server)
            .await;

        let moderator = AzureContentModerator::new(reqwest::Client::new(), server.uri(), "k");
        let err = moderator.screen("text").await.unwrap_err();

        assert_matches!(
            err,
            ModerationError::Status { status: 503, ref body } if body == "throttled"
        );
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let moderator = AzureContentModerator::new(
            reqwest::Client::new(),
            "https://westus.api.cognitive.microsoft.com/",
            "k",
        );
        assert_eq!(
            moderator.screen_url(),
            "https://westus.api.cognitive.microsoft.com/contentmoderator/moderate/v1.0/ProcessText/Screen"
        );
    }
}
