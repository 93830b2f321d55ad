pub mod auth;
pub mod characters;
pub mod game;
pub mod health;
pub mod meta;
pub mod questions;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/verify-password    POST  verify the shared admin password
///
/// /prompts                 GET   prompt suggestions
/// /background              GET   default background image (data URL)
///
/// /characters              GET   list characters (with portrait data URLs)
/// /characters              POST  upload + generate images (multipart)
///
/// /questions/generate      POST  AI question generation
///
/// /game/question/{qid}     POST  fetch question + aligned image
/// /game/answer             POST  submit an answer
/// ```
///
/// The request timeout is applied here, per route group, rather than
/// around the whole app: the character upload polls the remote agent
/// for up to the edit deadline per prompt, so the `/characters` routes
/// are mounted outside the timeout and bounded by the poll deadline
/// instead.
pub fn api_routes(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(meta::router())
        .nest("/questions", questions::router())
        .nest("/game", game::router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .nest("/characters", characters::router())
}
