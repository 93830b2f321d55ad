//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /verify-password  -> check the shared admin password
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/verify-password", post(auth::verify_password))
}
