/// Errors from an issue tracker call.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The tracker answered with a non-2xx status.
    #[error("{provider} returned {status} {reason}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        reason: String,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response did not contain the expected field.
    #[error("{provider} response is missing `{field}`")]
    MissingField {
        provider: &'static str,
        field: &'static str,
    },

    /// The tracker was handed a repository of the other kind.
    #[error("{provider} cannot open issues in a {kind} repository")]
    UnsupportedTarget {
        provider: &'static str,
        kind: &'static str,
    },
}

/// Errors from the moderation service.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Moderation service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// A non-2xx upstream response, with its body read for logging.
#[derive(Debug)]
pub(crate) struct FailedResponse {
    pub status: reqwest::StatusCode,
    pub body: String,
}

/// Pass 2xx responses through; otherwise read the body and report the status.
pub(crate) async fn check_response(
    response: reqwest::Response,
) -> Result<reqwest::Response, FailedResponse> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(FailedResponse { status, body })
}

impl From<FailedResponse> for ModerationError {
    fn from(failed: FailedResponse) -> Self {
        ModerationError::Status {
            status: failed.status.as_u16(),
            body: failed.body,
        }
    }
}

impl FailedResponse {
    fn into_tracker_error(self, provider: &'static str) -> TrackerError {
        TrackerError::Status {
            provider,
            status: self.status.as_u16(),
            reason: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            body: self.body,
        }
    }
}

/// Turn a non-2xx response into [`TrackerError::Status`].
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, TrackerError> {
    check_response(response)
        .await
        .map_err(|failed| failed.into_tracker_error(provider))
}
