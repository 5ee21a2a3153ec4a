//! Summarization client error types.

use std::sync::Arc;

use presskit_core::Error;

/// Errors from the summarization endpoint.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SummarizeError {
    /// Account id or API token not configured.
    #[error("missing credentials: ai_account_id and ai_api_token must both be set")]
    MissingCredentials,

    /// Nothing to summarize.
    #[error("empty input")]
    EmptyInput,

    /// Authentication failed (invalid API token).
    #[error("authentication failed: invalid API token")]
    AuthError,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// The endpoint answered but reported failure.
    #[error("inference failed: {0}")]
    Rejected(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SummarizeError::Timeout } else { SummarizeError::Network(Arc::new(err)) }
    }
}

impl From<SummarizeError> for Error {
    fn from(err: SummarizeError) -> Self {
        Error::SummarizeFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SummarizeError::MissingCredentials;
        assert!(err.to_string().contains("ai_api_token"));

        let err = SummarizeError::HttpError { status: 503 };
        assert_eq!(err.to_string(), "HTTP error: 503");
    }

    #[test]
    fn test_into_core_error() {
        let err: Error = SummarizeError::Rejected("model overloaded".into()).into();
        assert!(matches!(&err, Error::SummarizeFailed(msg) if msg.contains("model overloaded")));
        assert!(err.is_upstream());
    }
}
