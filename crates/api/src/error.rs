use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use unveil_agent::AgentError;
use unveil_core::error::CoreError;
use unveil_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain error types and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the shape `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `unveil_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A flat-file storage error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A remote agent API error.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Store(store) => match store {
                StoreError::QuestionsMissing { folder } => (
                    StatusCode::NOT_FOUND,
                    "QUESTIONS_MISSING",
                    format!("questions.json not found in {}", folder.display()),
                ),
                other => {
                    tracing::error!(error = %other, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_ERROR",
                        "A storage error occurred".to_string(),
                    )
                }
            },

            AppError::Agent(agent) => match agent {
                AgentError::TimedOut(_) => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "AGENT_TIMEOUT",
                    agent.to_string(),
                ),
                other => {
                    tracing::error!(error = %other, "Agent API error");
                    (
                        StatusCode::BAD_GATEWAY,
                        "AGENT_ERROR",
                        "The remote agent API call failed".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
