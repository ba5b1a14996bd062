//! Content moderation gate.
//!
//! The gate screens everything the reporter typed. A verdict is opaque apart
//! from `Classification.ReviewRecommended`; the whole verdict is kept so it
//! can be echoed back to the client when a report is rejected.

use serde_json::Value;

use crate::report::BugReport;

/// Text submitted to the moderation service for `report`: title, body and
/// any version strings, joined by single spaces.
pub fn moderation_text(report: &BugReport) -> String {
    let mut parts: Vec<&str> = vec![report.title.as_str(), report.body.as_str()];

    if let Some(version) = &report.version_information {
        parts.push(&version.core);
        parts.push(&version.system);
        if let Some(module) = version.module_version() {
            parts.push(module);
        }
    }

    parts.join(" ")
}

/// Verdict returned by the moderation service.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationVerdict {
    raw: Value,
}

impl ModerationVerdict {
    pub fn from_raw(raw: Value) -> Self {
        Self { raw }
    }

    /// Tri-state review flag: `None` when the service did not classify.
    pub fn review_recommended(&self) -> Option<bool> {
        self.raw
            .get("Classification")
            .and_then(|classification| classification.get("ReviewRecommended"))
            .and_then(Value::as_bool)
    }

    /// Whether the report must be blocked.
    pub fn requires_review(&self) -> bool {
        self.review_recommended() == Some(true)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}
