//! The home page and the navigation it supplies to every page.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use presskit_client::load_content;
use presskit_core::{Content, NavItem};

use crate::error::AppError;
use crate::layout::Layout;
use crate::state::AppState;

/// Navigation shown on every page, in order.
const NAV: &[(&str, &str)] = &[
    ("home", "/"),
    ("new-thing", "/new-thing"),
    ("multi-page", "/multi-page"),
    ("tailwind", "/tailwind"),
    ("summarize", "/summarize"),
    ("daisyUI", "/daisyui"),
];

pub fn fixed_nav() -> Vec<NavItem> {
    NAV.iter().map(|(text, link)| NavItem::new(*text, *link)).collect()
}

/// Home content, fetched on first use and kept for the life of the process.
///
/// The index file's attributes are replaced by the fixed `nav` list alone,
/// so the home title is always the default. A failed fetch is kept too,
/// like any other record.
pub async fn home_content(state: &AppState) -> &Content {
    state
        .home
        .get_or_init(|| async move {
            let url = state.config.index_url();
            let mut content = load_content(&state.fetcher, &url).await;
            content.attrs.clear();
            content.set_nav(&fixed_nav());
            tracing::info!(url, status = content.status_code, "home content loaded");
            content
        })
        .await
}

pub async fn show(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let content = home_content(&state).await;
    let nav = content.nav();
    Ok(Html(Layout::home(content, &nav).render()?))
}
