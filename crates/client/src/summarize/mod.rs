//! Summarization client for a managed inference endpoint.
//!
//! ### Specification
//!
//! - **Endpoint**: `POST {base_url}/accounts/{account_id}/ai/run/{model}`
//! - **Authentication**: `Authorization: Bearer <token>`
//! - **Body**: `{ "input_text": ..., "max_length": ... }`
//! - **Response**: `{ "success", "result": { "summary" }, "errors" }`
//!
//! No retries; a failed call simply leaves the page without a summary.

pub mod error;
pub mod response;

pub use error::SummarizeError;
pub use response::{ApiEnvelope, SummarizeRequest, SummaryResult};

use async_trait::async_trait;
use presskit_core::AppConfig;
use reqwest::header;
use std::time::{Duration, Instant};

/// Default base URL for the inference API.
const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default summarization model.
const DEFAULT_MODEL: &str = "@cf/facebook/bart-large-cnn";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces a short summary of page text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Inference client configuration.
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    /// Base URL (default: https://api.cloudflare.com/client/v4).
    pub base_url: String,
    /// Model identifier (default: @cf/facebook/bart-large-cnn).
    pub model: String,
    /// Upper bound on summary length, in model tokens.
    pub max_length: u32,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for WorkersAiConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            api_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_length: 50,
            timeout: DEFAULT_TIMEOUT,
            user_agent: "presskit-worker".to_string(),
        }
    }
}

impl WorkersAiConfig {
    /// Build from application configuration.
    ///
    /// Returns None when the inference binding is not configured.
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        let binding = config.summarizer_binding()?;
        Some(Self {
            account_id: binding.account_id.to_string(),
            api_token: binding.api_token.to_string(),
            base_url: config.ai_base_url.clone(),
            model: config.ai_model.clone(),
            max_length: config.summary_max_length,
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn run_url(&self) -> String {
        format!("{}/accounts/{}/ai/run/{}", self.base_url.trim_end_matches('/'), self.account_id, self.model)
    }
}

/// REST client for the hosted summarization model.
#[derive(Debug, Clone)]
pub struct WorkersAiSummarizer {
    http: reqwest::Client,
    config: WorkersAiConfig,
}

impl WorkersAiSummarizer {
    pub fn new(config: WorkersAiConfig) -> Result<Self, SummarizeError> {
        if config.account_id.is_empty() || config.api_token.is_empty() {
            return Err(SummarizeError::MissingCredentials);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(SummarizeError::from)?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl Summarizer for WorkersAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let start = Instant::now();
        let body = SummarizeRequest { input_text: text, max_length: self.config.max_length };

        let http_response = self
            .http
            .post(self.config.run_url())
            .bearer_auth(&self.config.api_token)
            .header(header::USER_AGENT, &self.config.user_agent)
            .json(&body)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("summarize response status: {}", status);

        if status == 401 || status == 403 {
            return Err(SummarizeError::AuthError);
        }

        let bytes = http_response.bytes().await?;

        if !status.is_success() {
            // the API usually still returns an envelope describing the failure
            return match serde_json::from_slice::<ApiEnvelope>(&bytes) {
                Ok(envelope) if !envelope.errors.is_empty() => Err(SummarizeError::Rejected(envelope.error_text())),
                _ => Err(SummarizeError::HttpError { status: status.as_u16() }),
            };
        }

        let envelope: ApiEnvelope = serde_json::from_slice(&bytes).map_err(|e| SummarizeError::Parse(e.to_string()))?;

        let summary = match envelope.result {
            Some(result) if envelope.success => result.summary,
            _ => return Err(SummarizeError::Rejected(envelope.error_text())),
        };

        tracing::debug!(
            "summarized {} chars into {} chars in {:?}",
            text.len(),
            summary.len(),
            start.elapsed()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summarizer_for(server: &MockServer) -> WorkersAiSummarizer {
        WorkersAiSummarizer::new(WorkersAiConfig {
            account_id: "acct".into(),
            api_token: "tok".into(),
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_missing_credentials() {
        let result = WorkersAiSummarizer::new(WorkersAiConfig::default());
        assert!(matches!(result, Err(SummarizeError::MissingCredentials)));
    }

    #[test]
    fn test_config_from_app_config() {
        assert!(WorkersAiConfig::from_app_config(&AppConfig::default()).is_none());

        let app = AppConfig {
            ai_account_id: Some("acct".into()),
            ai_api_token: Some("tok".into()),
            summary_max_length: 80,
            ..Default::default()
        };
        let config = WorkersAiConfig::from_app_config(&app).unwrap();
        assert_eq!(config.max_length, 80);
        assert_eq!(
            config.run_url(),
            "https://api.cloudflare.com/client/v4/accounts/acct/ai/run/@cf/facebook/bart-large-cnn"
        );
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts/acct/ai/run/@cf/facebook/bart-large-cnn"))
            .and(header_eq("Authorization", "Bearer tok"))
            .and(body_json(json!({"input_text": "Long page text.", "max_length": 50})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"summary": "Short."},
                "success": true,
                "errors": [],
                "messages": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summary = summarizer_for(&server).summarize("Long page text.").await.unwrap();
        assert_eq!(summary, "Short.");
    }

    #[tokio::test]
    async fn test_summarize_empty_input_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = summarizer_for(&server).summarize("  \n ").await;
        assert!(matches!(result, Err(SummarizeError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_summarize_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = summarizer_for(&server).summarize("text").await;
        assert!(matches!(result, Err(SummarizeError::AuthError)));
    }

    #[tokio::test]
    async fn test_summarize_rejected_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "errors": [{"code": 5006, "message": "input too long"}],
                "result": null
            })))
            .mount(&server)
            .await;

        let result = summarizer_for(&server).summarize("text").await;
        assert!(matches!(result, Err(SummarizeError::Rejected(msg)) if msg.contains("input too long")));
    }

    #[tokio::test]
    async fn test_summarize_server_error_without_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let result = summarizer_for(&server).summarize("text").await;
        assert!(matches!(result, Err(SummarizeError::HttpError { status: 502 })));
    }
}
