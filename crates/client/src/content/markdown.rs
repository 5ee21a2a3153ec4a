//! Markdown rendering with pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render a markdown body to HTML.
///
/// Inline HTML in the source is passed through unchanged.
pub fn render_markdown(body: &str) -> String {
    let parser = Parser::new_ext(body, options());
    let mut out = String::with_capacity(body.len() + body.len() / 2);
    html::push_html(&mut out, parser);
    out
}
