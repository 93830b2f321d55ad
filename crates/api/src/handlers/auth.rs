//! Shared-password verification.
//!
//! Auth is a single plaintext password stored in a file on disk;
//! there are no users, tokens, or sessions.

use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyPasswordForm {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
    pub message: String,
}

/// POST /api/v1/auth/verify-password
///
/// Compares the submitted password (whitespace-trimmed) against the
/// contents of the configured password file. A missing file is
/// reported as an invalid login rather than a server error.
pub async fn verify_password(
    State(state): State<AppState>,
    Form(form): Form<VerifyPasswordForm>,
) -> Json<VerifyPasswordResponse> {
    let correct = match tokio::fs::read_to_string(&state.config.password_file).await {
        Ok(contents) => contents.trim().to_string(),
        Err(e) => {
            tracing::warn!(
                path = %state.config.password_file.display(),
                error = %e,
                "Password file unreadable"
            );
            return Json(VerifyPasswordResponse {
                valid: false,
                message: "Password file not found!".into(),
            });
        }
    };

    if form.password.trim() == correct {
        Json(VerifyPasswordResponse {
            valid: true,
            message: "Authentication successful!".into(),
        })
    } else {
        Json(VerifyPasswordResponse {
            valid: false,
            message: "Incorrect password!".into(),
        })
    }
}
