//! Shared application state handed to every request handler.

use std::sync::Arc;

use presskit_client::{
    FetchClient, FetchConfig, Summarizer, TreeClient, TreeConfig, WorkersAiConfig, WorkersAiSummarizer,
};
use presskit_core::{AppConfig, CacheDb, Content, Error};
use tokio::sync::OnceCell;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cache: CacheDb,
    pub fetcher: FetchClient,
    pub tree: TreeClient,
    /// `None` when no inference binding is configured.
    pub summarizer: Option<Arc<dyn Summarizer>>,
    /// Home page content, loaded once per process.
    pub home: Arc<OnceCell<Content>>,
}

impl AppState {
    /// Build the HTTP clients described by `config` around an open cache.
    pub fn new(config: AppConfig, cache: CacheDb) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(&config))?;
        let tree = TreeClient::new(TreeConfig::from(&config))?;

        let summarizer = match WorkersAiConfig::from_app_config(&config) {
            Some(ai) => {
                tracing::info!(model = %ai.model, "summarization enabled");
                Some(Arc::new(WorkersAiSummarizer::new(ai)?) as Arc<dyn Summarizer>)
            }
            None => {
                tracing::info!("summarization disabled: no inference binding configured");
                None
            }
        };

        Ok(Self { config: Arc::new(config), cache, fetcher, tree, summarizer, home: Arc::new(OnceCell::new()) })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const TEST_TOKEN: &str = "ghp_test";

    /// State whose upstreams all point at `upstream` (a mock server URI).
    pub async fn state_for(upstream: &str) -> AppState {
        let config = AppConfig {
            content_url_prefix: format!("{upstream}/content"),
            tree_url: format!("{upstream}/repos/jldec/presskit/git/trees/HEAD?recursive=TRUE"),
            github_token: Some(TEST_TOKEN.into()),
            timeout_ms: 5_000,
            ..Default::default()
        };
        let cache = CacheDb::open_in_memory().await.unwrap();
        AppState::new(config, cache).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_summarizer_disabled_without_binding() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let state = AppState::new(AppConfig::default(), cache).unwrap();
        assert!(state.summarizer.is_none());
        assert!(state.home.get().is_none());
    }

    #[tokio::test]
    async fn test_summarizer_enabled_with_binding() {
        let config = AppConfig {
            ai_account_id: Some("acct".into()),
            ai_api_token: Some("secret".into()),
            ..Default::default()
        };
        let cache = CacheDb::open_in_memory().await.unwrap();
        let state = AppState::new(config, cache).unwrap();
        assert!(state.summarizer.is_some());
    }
}
