use std::future::Future;
use std::time::Duration;

use tailed_core::{CalendarWeek, GitHubConfig, TailedError};

use crate::calendar::{parse_calendar_response, YearWindow, CALENDAR_QUERY};
use crate::fetch::CalendarSource;

/// GitHub GraphQL client for contribution calendars.
///
/// # Examples
///
/// ```
/// use tailed_core::GitHubConfig;
/// use tailed_github::client::GitHubClient;
///
/// let client = GitHubClient::new(&GitHubConfig::default(), Some("ghp_xxxx")).unwrap();
/// assert_eq!(client.api_url(), "https://api.github.com/graphql");
/// ```
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client.
    ///
    /// The token is taken from `token`, then `config.token`, then the
    /// `GITHUB_TOKEN` and `GH_TOKEN` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`TailedError::Config`] if no token is available, or
    /// [`TailedError::GitHub`] if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, token: Option<&str>) -> Result<Self, TailedError> {
        let token = resolve_token(token, config.token.as_deref())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .or_else(|| std::env::var("GH_TOKEN").ok())
            .ok_or_else(|| {
                TailedError::Config(
                    "GITHUB_TOKEN not set. Pass --token or set GITHUB_TOKEN env var".into(),
                )
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TailedError::GitHub(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            token,
        })
    }

    /// The GraphQL endpoint this client posts to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch one window of `login`'s contribution calendar.
    ///
    /// # Errors
    ///
    /// Returns [`TailedError::GitHub`] on network errors, non-success
    /// statuses, GraphQL errors, or an unknown user.
    pub async fn fetch_calendar(
        &self,
        login: &str,
        window: YearWindow,
    ) -> Result<Vec<CalendarWeek>, TailedError> {
        let body = serde_json::json!({
            "query": CALENDAR_QUERY,
            "variables": {
                "login": login,
                "from": window.from_param(),
                "to": window.to_param(),
            },
        });

        tracing::debug!(
            login,
            from = %window.from_param(),
            to = %window.to_param(),
            "requesting contribution calendar"
        );

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| TailedError::GitHub(format!("failed to fetch calendar: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TailedError::GitHub(format!(
                "GitHub API error {status}: {body}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TailedError::GitHub(format!("failed to read calendar response: {e}")))?;

        parse_calendar_response(&payload)
    }
}

impl CalendarSource for GitHubClient {
    fn fetch_window(
        &self,
        login: &str,
        window: YearWindow,
    ) -> impl Future<Output = Result<Vec<CalendarWeek>, TailedError>> + Send {
        self.fetch_calendar(login, window)
    }
}

/// Pick the first explicitly provided token, ignoring blank values.
fn resolve_token(explicit: Option<&str>, configured: Option<&str>) -> Option<String> {
    [explicit, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}
