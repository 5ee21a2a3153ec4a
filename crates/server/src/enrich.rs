//! Background summary enrichment.
//!
//! After a page is fetched and cached, a detached task asks the summarizer for
//! a summary of the page text and rewrites the cache entry with it attached.
//! Failures are logged and leave the cached record as it was.

use presskit_client::{Summarizer, plain_text};
use presskit_core::{CacheDb, Content, Error};
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Summarize `content` and store it under `key` with the summary attached.
pub async fn summarize_and_cache(
    cache: &CacheDb, summarizer: &dyn Summarizer, key: &str, mut content: Content,
) -> Result<(), Error> {
    let text = plain_text(&content.html);
    let summary = summarizer.summarize(&text).await?;

    content.summary = Some(summary);
    cache.put_content(key, &content).await?;
    tracing::info!(key, "summary cached");
    Ok(())
}

/// Detach an enrichment task for `key`.
///
/// Returns `None` when summarization is disabled. The handle is only awaited
/// in tests; request handlers drop it.
pub fn spawn(state: &AppState, key: String, content: Content) -> Option<JoinHandle<()>> {
    let Some(summarizer) = state.summarizer.clone() else {
        tracing::debug!(key, "summarization disabled, skipping enrichment");
        return None;
    };
    let cache = state.cache.clone();

    Some(tokio::spawn(async move {
        if let Err(e) = summarize_and_cache(&cache, summarizer.as_ref(), &key, content).await {
            tracing::warn!(key, error = %e, "summary enrichment failed");
        }
    }))
}
