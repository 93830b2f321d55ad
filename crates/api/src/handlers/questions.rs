//! AI question generation.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use unveil_core::question::Question;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub api_key: String,
    pub topic: String,
    pub difficulties: Vec<i64>,
    pub num_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/v1/questions/generate
///
/// Runs the streaming chat agent and returns the extracted question
/// list. Failures (network, stream, extraction, parse) degrade to a
/// `success: false` payload with a user-facing message.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Json<GenerateResponse> {
    match state
        .agent
        .generate_questions(&req.api_key, &req.topic, &req.difficulties, req.num_questions)
        .await
    {
        Ok(questions) => Json(GenerateResponse {
            success: true,
            count: Some(questions.len()),
            questions: Some(questions),
            message: None,
        }),
        Err(e) => {
            tracing::warn!(topic = %req.topic, error = %e, "Question generation failed");
            Json(GenerateResponse {
                success: false,
                questions: None,
                count: None,
                message: Some("Failed to generate questions. Please try again.".into()),
            })
        }
    }
}
