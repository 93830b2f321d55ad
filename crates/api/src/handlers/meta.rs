//! Prompt suggestions and default background image.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PromptsResponse {
    pub prompts: Vec<Value>,
}

/// GET /api/v1/prompts
///
/// Returns the prompt-suggestion list from the configured JSON file.
/// A missing or unparseable file degrades to an empty list.
pub async fn prompts(State(state): State<AppState>) -> Json<PromptsResponse> {
    let path = &state.config.prompts_file;

    let prompts = match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(prompts) => prompts,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid prompts file");
                Vec::new()
            }
        },
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Prompts file unreadable");
            Vec::new()
        }
    };

    Json(PromptsResponse { prompts })
}

#[derive(Debug, Serialize)]
pub struct BackgroundResponse {
    pub image: Option<String>,
}

/// GET /api/v1/background
///
/// Returns the default background image as a base64 data URL, or null
/// when the file is missing.
pub async fn background(State(state): State<AppState>) -> Json<BackgroundResponse> {
    let image = unveil_store::images::data_url(&state.config.background_file).await;
    Json(BackgroundResponse { image })
}
