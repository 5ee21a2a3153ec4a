//! Client code for presskit.
//!
//! This crate provides the HTTP fetch pipeline, markdown rendering, and the
//! clients for the source-control tree and the summarization endpoint.

pub mod content;
pub mod fetch;
pub mod github;
pub mod summarize;

pub use content::{Parsed, load_content, parse_frontmatter, plain_text, render_markdown};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, content_url};
pub use github::{TreeClient, TreeConfig, TreeOutcome};
pub use summarize::{SummarizeError, Summarizer, WorkersAiConfig, WorkersAiSummarizer};
