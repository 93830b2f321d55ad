//! Route definitions for the `/characters` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET  /  -> list characters with portrait data URLs
/// POST /  -> upload character + generate images (multipart)
/// ```
///
/// The upload accepts a full-size portrait, so the default 2 MB body
/// limit is raised.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(characters::list).post(characters::upload))
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
}
