//! Inbound bug report payload.
//!
//! Field names on the wire follow the game client (`repo`, `moduleList`,
//! `moduleSettings`, ...). Unknown fields are ignored so older clients that
//! still send `labels` keep working.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// A bug report as submitted by the in-game form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BugReport {
    /// GitHub repository/issues URL, or a fully parameterised GitLab API URL.
    #[serde(rename = "repo")]
    pub repository_url: String,
    pub title: String,
    pub body: String,
    #[serde(rename = "versionInformation", default)]
    pub version_information: Option<VersionInformation>,
    /// Pre-rendered `<details>` block listing active modules.
    #[serde(rename = "moduleList", default)]
    pub module_list_html: Option<String>,
    /// Pre-rendered `<details>` block with the module's settings.
    #[serde(rename = "moduleSettings", default)]
    pub module_settings_html: Option<String>,
}

/// Versions of the game core, the active system and (optionally) the module
/// the report is about.
///
/// Clients send `null` when a version is unknown; that reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInformation {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub core: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub system: String,
    #[serde(default)]
    pub module: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl VersionInformation {
    /// The module version, if one was supplied and it is not empty.
    pub fn module_version(&self) -> Option<&str> {
        self.module.as_deref().filter(|m| !m.is_empty())
    }
}

impl BugReport {
    /// Reject reports that can never produce a valid issue.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.repository_url.trim().is_empty() {
            return Err(CoreError::Validation("repo must not be empty".into()));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        Ok(())
    }
}
