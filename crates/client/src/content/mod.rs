//! Markdown documents: frontmatter, rendering, and plain-text extraction.
//!
//! A content file is fetched from the raw content prefix, split into a YAML
//! frontmatter block and a markdown body, and the body is rendered to HTML.
//! Fetch failures never escape: they become a 500 record carrying the error
//! message as its body.

pub mod frontmatter;
pub mod markdown;
pub mod text;

pub use frontmatter::{Parsed, parse_frontmatter};
pub use markdown::render_markdown;
pub use text::plain_text;

use crate::fetch::FetchClient;
use presskit_core::Content;

/// Fetch a markdown file and render it into a content record.
///
/// The record carries the upstream status, so a missing file yields a 404
/// record rather than an error.
pub async fn load_content(client: &FetchClient, url: &str) -> Content {
    match client.fetch(url).await {
        Ok(response) => {
            tracing::debug!(
                url = %response.url,
                final_url = %response.final_url,
                status = response.status.as_u16(),
                content_type = response.content_type.as_deref().unwrap_or("-"),
                fetch_ms = response.fetch_ms,
                bytes = response.bytes.len(),
                "fetched content"
            );
            let parsed = parse_frontmatter(&response.text());
            Content {
                status_code: response.status.as_u16(),
                attrs: parsed.attrs,
                html: render_markdown(&parsed.body),
                summary: None,
            }
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "content fetch failed");
            Content::failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_content_renders_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/new-thing.md"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("---\ntitle: New Thing\n---\n# New\n\nSomething *new*.\n"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let content = load_content(&client, &format!("{}/content/new-thing.md", server.uri())).await;

        assert_eq!(content.status_code, 200);
        assert_eq!(content.attrs.get("title"), Some(&json!("New Thing")));
        assert_eq!(content.html, "<h1>New</h1>\n<p>Something <em>new</em>.</p>\n");
        assert!(content.summary.is_none());
    }

    #[tokio::test]
    async fn test_load_content_keeps_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("404: Not Found"))
            .mount(&server)
            .await;

        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let content = load_content(&client, &format!("{}/content/nope.md", server.uri())).await;

        assert_eq!(content.status_code, 404);
        assert_eq!(content.html, "<p>404: Not Found</p>\n");
    }

    #[tokio::test]
    async fn test_load_content_fetch_failure_becomes_500() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let content = load_content(&client, "http://127.0.0.1:1/content/index.md").await;

        assert_eq!(content.status_code, 500);
        assert!(content.html.contains("HTTP_ERROR"));
        assert!(content.attrs.is_empty());
    }
}
