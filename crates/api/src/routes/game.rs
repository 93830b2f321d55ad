//! Route definitions for the `/game` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::game;
use crate::state::AppState;

/// Routes mounted at `/game`.
///
/// ```text
/// POST /question/{qid}  -> fetch question + aligned image
/// POST /answer          -> submit an answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/question/{qid}", post(game::get_question))
        .route("/answer", post(game::submit_answer))
}
