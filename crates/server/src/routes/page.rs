//! Content pages: cache lookup, upstream fetch on miss, background enrichment.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use presskit_client::{content_url, load_content};
use presskit_core::cache::content_etag;
use presskit_core::{CacheDb, Content, Error, TREE_KEY};

use super::home::home_content;
use crate::enrich;
use crate::error::AppError;
use crate::layout::Layout;
use crate::state::AppState;

pub async fn show(State(state): State<AppState>, Path(path): Path<String>) -> Result<Response, AppError> {
    // the tree shares the keyspace and is only reachable through /tree
    if path == TREE_KEY {
        return Err(AppError::NotFound);
    }

    let content = match cached(&state.cache, &path).await? {
        Some(content) => {
            tracing::debug!(path, "cache hit");
            content
        }
        None => {
            let url = content_url(&state.config.content_url_prefix, &path);
            let content = load_content(&state.fetcher, &url).await;
            state.cache.put_content(&path, &content).await?;
            tracing::info!(path, status = content.status_code, "cached upstream content");
            enrich::spawn(&state, path.clone(), content.clone());
            content
        }
    };

    let nav = home_content(&state).await.nav();
    let body = Layout::page(&content, &nav).render()?;
    let status = StatusCode::from_u16(content.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let etag = content_etag(&content.html, content.summary.as_deref());

    Ok((status, [(header::ETAG, etag)], Html(body)).into_response())
}

/// Look up a cached record. An entry that no longer parses is treated as a
/// miss so the next fetch overwrites it.
async fn cached(cache: &CacheDb, path: &str) -> Result<Option<Content>, AppError> {
    match cache.get_content(path).await {
        Ok(content) => Ok(content),
        Err(Error::Malformed(e)) => {
            tracing::warn!(path, error = %e, "discarding malformed cache entry");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
