//! HTTP routes.
//!
//! | Route         | Handler         |
//! |---------------|-----------------|
//! | `GET /`       | [`home::show`]  |
//! | `GET /tree`   | [`tree::show`]  |
//! | `POST /tree`  | [`tree::refresh`] |
//! | `GET /static/*` | files under `static_dir` |
//! | `GET /{*path}` | [`page::show`] |

pub mod home;
pub mod page;
pub mod tree;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(home::show))
        .route("/tree", get(tree::show).post(tree::refresh))
        .route("/{*path}", get(page::show))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
