//! HTTP-facing errors for the presskit server.
//!
//! Core errors keep their coded message; the status code depends on whether
//! an upstream service or this server is at fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use presskit_core::{ConfigError, Error};

/// Errors a request handler can return.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("RENDER_FAILED: {0}")]
    Render(#[from] askama::Error),

    #[error("404 Not Found")]
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Core(err) if err.is_upstream() => StatusCode::BAD_GATEWAY,
            AppError::Core(_) | AppError::Config(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
