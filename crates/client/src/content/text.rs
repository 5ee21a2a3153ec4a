//! Plain-text extraction from rendered HTML.

use scraper::Html;

/// Collect the text nodes of an HTML fragment, collapsing whitespace.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
