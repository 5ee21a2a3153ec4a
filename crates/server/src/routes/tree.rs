//! Repository tree: `GET /tree` serves the cached copy, `POST /tree`
//! refreshes it from GitHub.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use presskit_client::TreeOutcome;
use presskit_core::Error;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

pub async fn show(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let raw = state.cache.get_tree().await?.ok_or(AppError::NotFound)?;
    let tree: Value = serde_json::from_str(&raw).map_err(Error::from)?;
    Ok(Json(tree))
}

pub async fn refresh(State(state): State<AppState>) -> Result<Response, AppError> {
    let token = state.config.require_github_token()?;

    match state.tree.fetch_tree(token).await? {
        TreeOutcome::Fetched(tree) => {
            let raw = serde_json::to_string(&tree).map_err(Error::from)?;
            state.cache.put_tree(&raw).await?;
            tracing::info!(bytes = raw.len(), "repository tree refreshed");
            Ok("OK".into_response())
        }
        TreeOutcome::Rejected { status, status_text } => Ok((status, status_text).into_response()),
    }
}
