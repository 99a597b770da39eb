//! GitHub API client.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::types::{GraphQlResponse, Viewer, ViewerData};

/// Public GitHub REST base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "repoconf";
const API_VERSION: &str = "2022-11-28";

/// The two calls a reconciliation run needs.
///
/// [`GitHubClient`] talks HTTP; tests substitute an in-memory implementation.
pub trait GitHubApi {
    /// Execute the viewer query and return its `viewer` payload.
    fn fetch(&self, query: &str) -> Result<Viewer, ApiError>;

    /// Partially update `owner/name` with the given REST fields.
    fn patch(&self, name_with_owner: &str, body: &Map<String, Value>) -> Result<(), ApiError>;
}

/// Blocking client for the GitHub GraphQL and REST endpoints.
pub struct GitHubClient {
    token: SecretString,
    api_url: String,
    graphql_url: String,
    agent: ureq::Agent,
}

impl GitHubClient {
    /// Create a client for github.com.
    pub fn new(token: SecretString) -> Self {
        Self::with_endpoints(token, DEFAULT_API_URL, format!("{DEFAULT_API_URL}/graphql"))
    }

    /// Create a client for explicit REST and GraphQL endpoints (GitHub Enterprise, test servers).
    pub fn with_endpoints(
        token: SecretString,
        api_url: impl Into<String>,
        graphql_url: impl Into<String>,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build();
        Self {
            token,
            api_url: trim_slash(api_url.into()),
            graphql_url: trim_slash(graphql_url.into()),
            agent,
        }
    }

    /// Create a client honouring `GITHUB_API_URL` and `GITHUB_GRAPHQL_URL`.
    ///
    /// These are the variables GitHub Actions runners export; when only the
    /// REST URL is set, GraphQL defaults to `<api>/graphql`.
    pub fn from_env(token: SecretString) -> Self {
        Self::from_env_with(token, |name| std::env::var(name).ok())
    }

    /// `from_env` with an injectable environment lookup.
    pub fn from_env_with<F>(token: SecretString, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = env("GITHUB_API_URL")
            .filter(|url| !url.trim().is_empty())
            .map(trim_slash)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let graphql_url = env("GITHUB_GRAPHQL_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| format!("{api_url}/graphql"));
        Self::with_endpoints(token, api_url, graphql_url)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set(
                "Authorization",
                &format!("Bearer {}", self.token.expose_secret()),
            )
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION)
    }
}

impl GitHubApi for GitHubClient {
    fn fetch(&self, query: &str) -> Result<Viewer, ApiError> {
        tracing::debug!("POST {}", self.graphql_url);
        let response = self
            .request("POST", &self.graphql_url)
            .send_json(json!({ "query": query }))?;

        let envelope: GraphQlResponse<ViewerData> = response
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if let Some(first) = envelope.errors.into_iter().next() {
            return Err(ApiError::Api {
                message: first.message,
            });
        }
        envelope
            .data
            .map(|data| data.viewer)
            .ok_or(ApiError::MissingData)
    }

    fn patch(&self, name_with_owner: &str, body: &Map<String, Value>) -> Result<(), ApiError> {
        let url = format!("{}/repos/{}", self.api_url, name_with_owner);
        tracing::debug!("PATCH {url}");
        self.request("PATCH", &url).send_json(body)?;
        Ok(())
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn token() -> SecretString {
        SecretString::from("t0k3n".to_string())
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_to_public_github() {
        let client = GitHubClient::from_env_with(token(), env_of(&[]));
        assert_eq!(client.api_url(), "https://api.github.com");
        assert_eq!(client.graphql_url(), "https://api.github.com/graphql");
    }

    #[test]
    fn enterprise_urls_from_env() {
        let env = env_of(&[
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3/"),
            ("GITHUB_GRAPHQL_URL", "https://ghe.example.com/api/graphql"),
        ]);
        let client = GitHubClient::from_env_with(token(), env);
        assert_eq!(client.api_url(), "https://ghe.example.com/api/v3");
        assert_eq!(client.graphql_url(), "https://ghe.example.com/api/graphql");
    }

    #[test]
    fn graphql_url_follows_api_url() {
        let env = env_of(&[("GITHUB_API_URL", "http://127.0.0.1:9999")]);
        let client = GitHubClient::from_env_with(token(), env);
        assert_eq!(client.graphql_url(), "http://127.0.0.1:9999/graphql");
    }
}
