//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PRESSKIT_*)
//! 2. TOML config file (if PRESSKIT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PRESSKIT_*)
/// 2. TOML config file (if PRESSKIT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Path to the SQLite file backing the page cache.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Raw file prefix; pages are fetched from `{prefix}/{path}.md`.
    #[serde(default = "default_content_url_prefix")]
    pub content_url_prefix: String,

    /// Home page file under the content prefix.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Recursive tree endpoint of the source-control API.
    #[serde(default = "default_tree_url")]
    pub tree_url: String,

    /// Bearer token for the tree endpoint.
    ///
    /// Set via PRESSKIT_GITHUB_TOKEN environment variable.
    /// Required only when the tree is refreshed.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Base URL of the inference API.
    #[serde(default = "default_ai_base_url")]
    pub ai_base_url: String,

    /// Account owning the inference endpoint.
    #[serde(default)]
    pub ai_account_id: Option<String>,

    /// Bearer token for the inference endpoint.
    #[serde(default)]
    pub ai_api_token: Option<String>,

    /// Summarization model.
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    /// `max_length` passed to the summarization model.
    #[serde(default = "default_summary_max_length")]
    pub summary_max_length: u32,

    /// User-Agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Outbound request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./presskit-cache.sqlite")
}

fn default_content_url_prefix() -> String {
    "https://raw.githubusercontent.com/jldec/presskit/main/content".into()
}

fn default_index_file() -> String {
    "index.md".into()
}

fn default_tree_url() -> String {
    "https://api.github.com/repos/jldec/presskit/git/trees/HEAD?recursive=TRUE".into()
}

fn default_ai_base_url() -> String {
    "https://api.cloudflare.com/client/v4".into()
}

fn default_ai_model() -> String {
    "@cf/facebook/bart-large-cnn".into()
}

fn default_summary_max_length() -> u32 {
    50
}

fn default_user_agent() -> String {
    "presskit-worker".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            db_path: default_db_path(),
            content_url_prefix: default_content_url_prefix(),
            index_file: default_index_file(),
            tree_url: default_tree_url(),
            github_token: None,
            ai_base_url: default_ai_base_url(),
            ai_account_id: None,
            ai_api_token: None,
            ai_model: default_ai_model(),
            summary_max_length: default_summary_max_length(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            static_dir: default_static_dir(),
        }
    }
}

/// Credentials for the inference endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerBinding<'a> {
    pub account_id: &'a str,
    pub api_token: &'a str,
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// URL of the home page file.
    pub fn index_url(&self) -> String {
        format!("{}/{}", self.content_url_prefix.trim_end_matches('/'), self.index_file)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PRESSKIT_`
    /// 2. TOML file from `PRESSKIT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PRESSKIT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PRESSKIT_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the source-control token is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the token is not set.
    pub fn require_github_token(&self) -> Result<&str, ConfigError> {
        self.github_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "github_token".into(),
                hint: "Set PRESSKIT_GITHUB_TOKEN environment variable".into(),
            })
    }

    /// Inference credentials, when both the account and the token are set.
    pub fn summarizer_binding(&self) -> Option<SummarizerBinding<'_>> {
        let account_id = self.ai_account_id.as_deref().filter(|s| !s.is_empty())?;
        let api_token = self.ai_api_token.as_deref().filter(|s| !s.is_empty())?;
        Some(SummarizerBinding { account_id, api_token })
    }
}
