//! Request and response bodies of the inference REST API.

use serde::{Deserialize, Serialize};

/// Input of the summarization model.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest<'a> {
    pub input_text: &'a str,
    pub max_length: u32,
}

/// Envelope wrapping every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<SummaryResult>,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

/// Output of the summarization model.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl ApiEnvelope {
    /// Error messages joined for display.
    pub fn error_text(&self) -> String {
        if self.errors.is_empty() {
            return "no result returned".to_string();
        }

        self.errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{code}: {}", e.message),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
