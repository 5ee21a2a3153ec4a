//! Source-control tree client.
//!
//! Fetches the recursive file tree of the content repository from the
//! GitHub REST API.
//!
//! - **Endpoint**: `GET /repos/{owner}/{repo}/git/trees/HEAD?recursive=TRUE`
//! - **Authentication**: `Authorization: Bearer <token>`
//! - **Versioning**: `X-GitHub-Api-Version: 2022-11-28`
//!
//! A rejected request is not an error: the caller relays the upstream
//! status and reason phrase unchanged.

use std::time::Duration;

use presskit_core::{AppConfig, Error};
use reqwest::{StatusCode, header};
use serde_json::Value;

/// Media type requested from the API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Pinned REST API version.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Tree client configuration.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Full tree URL including the `recursive` query.
    pub url: String,
    /// User-agent string; the API rejects requests without one.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum response body size in bytes.
    pub max_bytes: usize,
}

impl From<&AppConfig> for TreeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            url: config.tree_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            max_bytes: config.max_bytes,
        }
    }
}

/// Result of a tree request.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeOutcome {
    /// The API answered 2xx with this JSON body.
    Fetched(Value),
    /// The API answered with a non-success status.
    Rejected { status: StatusCode, status_text: String },
}

/// GitHub tree API client.
#[derive(Debug, Clone)]
pub struct TreeClient {
    http: reqwest::Client,
    config: TreeConfig,
}

impl TreeClient {
    pub fn new(config: TreeConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch the recursive tree using `token` as the bearer credential.
    pub async fn fetch_tree(&self, token: &str) -> Result<TreeOutcome, Error> {
        tracing::debug!("fetching repository tree: {}", self.config.url);

        let response = self
            .http
            .get(&self.config.url)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(token)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header(header::USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(format!("tree request after {}ms", self.config.timeout.as_millis()))
                } else {
                    Error::HttpError(format!("network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            tracing::warn!(status = status.as_u16(), %status_text, "tree request rejected");
            return Ok(TreeOutcome::Rejected { status, status_text });
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("tree: {} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::HttpError(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "tree: {} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let tree: Value =
            serde_json::from_slice(&bytes).map_err(|e| Error::HttpError(format!("invalid tree JSON: {}", e)))?;

        Ok(TreeOutcome::Fetched(tree))
    }
}
