//! HTTP transport against the GitHub REST API
//!
//! The `Transport` trait is the seam between the fetch pipeline and the
//! network; tests swap in a mock, production code uses `GitHubTransport`
//! (reqwest, OAuth2 client credentials as query parameters).

use crate::{ContribsError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated access to a REST API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Probe the API with the configured credentials.
    ///
    /// Fails on invalid credentials or network error. Used once per
    /// aggregation run before any fan-out starts.
    async fn authenticate(&self) -> Result<()>;

    /// Perform an authenticated GET of a relative API path and return
    /// the decoded JSON body. The path may already carry a query string.
    async fn get(&self, path: &str) -> Result<serde_json::Value>;
}

/// reqwest-backed transport against `https://api.github.com`
pub struct GitHubTransport {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl GitHubTransport {
    /// Create a new transport from OAuth2 application credentials.
    ///
    /// Returns a configuration error if either credential is empty, and
    /// an error if the HTTP client cannot be created.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ContribsError::Config(
                "client_id and client_secret are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::USER_AGENT,
                    header::HeaderValue::from_static("contribs/0.1"),
                );
                headers.insert(
                    header::ACCEPT,
                    header::HeaderValue::from_static("application/vnd.github.v3+json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            base_url: "https://api.github.com".to_string(),
            client_id,
            client_secret,
        })
    }

    /// Override the API base URL (GitHub Enterprise deployments)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the full request URL with credential query parameters appended
    fn signed_url(&self, path: &str) -> String {
        format!(
            "{}{}{}client_id={}&client_secret={}",
            self.base_url,
            path,
            query_appender(path),
            self.client_id,
            self.client_secret
        )
    }
}

#[async_trait]
impl Transport for GitHubTransport {
    async fn authenticate(&self) -> Result<()> {
        // A GET against the API root validates the credentials without
        // touching any user data.
        debug!("Authenticating against GitHub API");
        self.get("").await.map_err(|e| match e {
            ContribsError::Auth(_) => e,
            other => ContribsError::Auth(other.to_string()),
        })?;
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.signed_url(path);

        debug!(path = %path, "GitHub API request");

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED => Err(ContribsError::Auth(
                "GitHub authentication failed".to_string(),
            )),
            StatusCode::FORBIDDEN => Err(ContribsError::Api(
                "GitHub API forbidden (rate limit?)".to_string(),
            )),
            status => {
                let error_body = response.text().await.unwrap_or_default();
                Err(ContribsError::Api(format!(
                    "HTTP {}: {}",
                    status, error_body
                )))
            }
        }
    }
}

/// Choose the separator for appending credential parameters to a path.
///
/// A path with an existing `key=value` pair continues with `&`; a path
/// with a bare `?` (no parameters yet) or no query string at all starts
/// with `?`.
fn query_appender(path: &str) -> &'static str {
    if path.contains('?') {
        if path.contains('=') {
            "&"
        } else {
            "?"
        }
    } else {
        "?"
    }
}
