//! Routes for operator-facing metadata: prompt suggestions and the
//! default background image.

use axum::routing::get;
use axum::Router;

use crate::handlers::meta;
use crate::state::AppState;

/// Routes mounted directly under `/api/v1`.
///
/// ```text
/// GET /prompts     -> prompt suggestion list
/// GET /background  -> default background image as data URL
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prompts", get(meta::prompts))
        .route("/background", get(meta::background))
}
