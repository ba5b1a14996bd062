//! Issue creation request and the canonical created-issue shape.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::repository::RepositoryTarget;

/// Everything a tracker needs to open an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub target: RepositoryTarget,
    pub title: String,
    /// Composed body; GitLab ignores it because the description is already
    /// part of the target URL.
    pub body: String,
}

/// Provider-independent view of a created issue.
///
/// `html_url` is GitHub's `html_url` or GitLab's `web_url`; `raw` is the
/// provider response as received.
///
/// Serialized as the provider's own fields at the top level, followed by
/// `htmlUrl` and `raw`. Deployed game clients read provider fields such as
/// `web_url` directly off the response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedIssue {
    pub html_url: String,
    pub raw: serde_json::Value,
}

const HTML_URL_KEY: &str = "htmlUrl";
const RAW_KEY: &str = "raw";

impl Serialize for CreatedIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(fields) = self.raw.as_object() {
            for (key, value) in fields
                .iter()
                .filter(|(key, _)| key.as_str() != HTML_URL_KEY && key.as_str() != RAW_KEY)
            {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry(HTML_URL_KEY, &self.html_url)?;
        map.serialize_entry(RAW_KEY, &self.raw)?;
        map.end()
    }
}
