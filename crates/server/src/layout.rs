//! Page layout shared by the home page and content pages.

use askama::Template;
use presskit_core::{Content, NavItem};

pub const DEFAULT_TITLE: &str = "Presskit";

const NO_SUMMARY: &str = " No summary yet.";

/// The single HTML layout: navbar, optional summary section, page body.
///
/// `html` is inserted unescaped; everything else is escaped.
#[derive(Template)]
#[template(path = "layout.html")]
pub struct Layout<'a> {
    pub title: &'a str,
    pub nav: &'a [NavItem],
    pub show_summary: bool,
    pub summary: &'a str,
    pub html: &'a str,
}

impl<'a> Layout<'a> {
    /// Home page: no summary section.
    pub fn home(content: &'a Content, nav: &'a [NavItem]) -> Self {
        Self {
            title: content.title().unwrap_or(DEFAULT_TITLE),
            nav,
            show_summary: false,
            summary: "",
            html: &content.html,
        }
    }

    /// Content page: always shows the summary section, with a placeholder
    /// until enrichment has run.
    pub fn page(content: &'a Content, nav: &'a [NavItem]) -> Self {
        Self {
            title: content.title().unwrap_or(DEFAULT_TITLE),
            nav,
            show_summary: true,
            summary: content.summary.as_deref().unwrap_or(NO_SUMMARY),
            html: &content.html,
        }
    }
}
