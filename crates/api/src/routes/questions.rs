//! Route definitions for the `/questions` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// POST /generate  -> generate quiz questions via the chat agent
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(questions::generate))
}
