use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TailedError;

/// Top-level configuration loaded from `.tailed.toml`.
///
/// Supports layered resolution: CLI flags > env vars > local config > defaults.
///
/// # Examples
///
/// ```
/// use tailed_core::TailedConfig;
///
/// let config = TailedConfig::default();
/// assert_eq!(config.github.timeout_secs, 30);
/// assert!(config.default_user.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TailedConfig {
    /// GitHub login analyzed when `fetch` is run without `--user`.
    pub default_user: Option<String>,
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,
}

impl TailedConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TailedError::FileNotFound`] if the file does not exist,
    /// [`TailedError::Io`] if it cannot be read, or [`TailedError::Toml`]
    /// if the content is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, TailedError> {
        if !path.exists() {
            return Err(TailedError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`TailedError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tailed_core::TailedConfig;
    ///
    /// let toml = r#"
    /// default_user = "octocat"
    ///
    /// [github]
    /// timeout_secs = 10
    /// "#;
    /// let config = TailedConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.default_user.as_deref(), Some("octocat"));
    /// assert_eq!(config.github.timeout_secs, 10);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, TailedError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// GitHub GraphQL API configuration.
///
/// # Examples
///
/// ```
/// use tailed_core::GitHubConfig;
///
/// let config = GitHubConfig::default();
/// assert_eq!(config.api_url, "https://api.github.com/graphql");
/// assert_eq!(config.user_agent, "tailed");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// GraphQL endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Personal access token. Falls back to `GITHUB_TOKEN` / `GH_TOKEN`.
    pub token: Option<String>,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://api.github.com/graphql".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "tailed".into()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = TailedConfig::default();
        assert!(config.default_user.is_none());
        assert_eq!(config.github.api_url, "https://api.github.com/graphql");
        assert!(config.github.token.is_none());
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.github.user_agent, "tailed");
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
default_user = "student42"

[github]
api_url = "https://ghe.example.com/api/graphql"
token = "ghp_test"
timeout_secs = 5
user_agent = "tailed-worker"
"#;
        let config = TailedConfig::from_toml(toml).unwrap();
        assert_eq!(config.default_user.as_deref(), Some("student42"));
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/graphql");
        assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.github.timeout_secs, 5);
        assert_eq!(config.github.user_agent, "tailed-worker");
    }

    #[test]
    fn partial_github_section_keeps_defaults() {
        let toml = r#"
[github]
token = "ghp_only"
"#;
        let config = TailedConfig::from_toml(toml).unwrap();
        assert_eq!(config.github.token.as_deref(), Some("ghp_only"));
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.github.api_url, "https://api.github.com/graphql");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = TailedConfig::from_toml("").unwrap();
        assert_eq!(config.github.timeout_secs, 30);
        assert!(config.default_user.is_none());
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = TailedConfig::from_toml("{{invalid}}");
        assert!(matches!(result, Err(TailedError::Toml(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = TailedConfig::from_file(Path::new("/definitely/not/here/.tailed.toml"));
        assert!(matches!(result, Err(TailedError::FileNotFound(_))));
    }
}
