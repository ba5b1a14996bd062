use std::fmt;
use std::net::IpAddr;

use axum::http::HeaderValue;
use bugrelay_trackers::github::DEFAULT_API_URL;

/// CORS origin value meaning "any origin".
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Credentials for the content moderation service.
#[derive(Clone)]
pub struct ModerationConfig {
    pub endpoint: String,
    pub api_key: String,
}

/// Server configuration loaded from environment variables.
///
/// Secrets are redacted from the `Debug` output so the config can be logged.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub moderation: ModerationConfig,
    /// GitHub API base URL (default: `https://api.github.com`).
    pub github_api_url: String,
    pub github_token: String,
    pub gitlab_token: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default                  |
    /// |-------------------------------|----------|--------------------------|
    /// | `HOST`                        | no       | `0.0.0.0`                |
    /// | `PORT`                        | no       | `3000`                   |
    /// | `CORS_ORIGINS`                | no       | `*`                      |
    /// | `REQUEST_TIMEOUT_SECS`        | no       | `30`                     |
    /// | `CONTENT_MODERATION_ENDPOINT` | **yes**  | --                       |
    /// | `CONTENT_MODERATION_API_KEY`  | **yes**  | --                       |
    /// | `GITHUB_API_URL`              | no       | `https://api.github.com` |
    /// | `GITHUB_PAT`                  | **yes**  | --                       |
    /// | `GITLAB_TOKEN`                | **yes**  | --                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let host = optional("HOST", "0.0.0.0");
        if host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Invalid {
                var: "HOST",
                value: host,
            });
        }

        let port = parse_number::<u16>("PORT", optional("PORT", "3000"))?;
        let request_timeout_secs =
            parse_number::<u64>("REQUEST_TIMEOUT_SECS", optional("REQUEST_TIMEOUT_SECS", "30"))?;

        let cors_origins: Vec<String> = optional("CORS_ORIGINS", ANY_ORIGIN)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.as_str() != ANY_ORIGIN && HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }

        let moderation = ModerationConfig {
            endpoint: required("CONTENT_MODERATION_ENDPOINT")?,
            api_key: required("CONTENT_MODERATION_API_KEY")?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            moderation,
            github_api_url: optional("GITHUB_API_URL", DEFAULT_API_URL),
            github_token: required("GITHUB_PAT")?,
            gitlab_token: required("GITLAB_TOKEN")?,
        })
    }

    /// Whether `CORS_ORIGINS` allows every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for ModerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModerationConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("moderation", &self.moderation)
            .field("github_api_url", &self.github_api_url)
            .field("github_token", &REDACTED)
            .field("gitlab_token", &REDACTED)
            .finish()
    }
}
