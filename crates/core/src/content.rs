//! The cached content record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A rendered page as stored in the cache.
///
/// Serialized as `{"statusCode", "attrs", "html", "summary"}`; `summary` is
/// omitted until background enrichment attaches one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// HTTP status the page is served with.
    pub status_code: u16,
    /// Frontmatter attributes.
    #[serde(default)]
    pub attrs: Map<String, Value>,
    /// Rendered HTML body.
    pub html: String,
    /// AI summary of the page, if enrichment has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub link: String,
}

impl NavItem {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self { text: Some(text.into()), link: link.into() }
    }

    /// Text shown in the navbar, falling back to the link itself.
    pub fn label(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.link)
    }
}

impl Content {
    /// A record with no attributes and no summary.
    pub fn new(status_code: u16, html: impl Into<String>) -> Self {
        Self { status_code, attrs: Map::new(), html: html.into(), summary: None }
    }

    /// A 500 record whose body is the failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    /// The `title` attribute, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.attrs.get("title").and_then(Value::as_str)
    }

    /// Navigation items from the `nav` attribute.
    ///
    /// Entries without a string `link` are skipped.
    pub fn nav(&self) -> Vec<NavItem> {
        self.attrs
            .get("nav")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace the `nav` attribute.
    pub fn set_nav(&mut self, items: &[NavItem]) {
        let value = serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new()));
        self.attrs.insert("nav".into(), value);
    }
}
