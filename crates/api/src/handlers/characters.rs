//! Character listing and the upload + generation flow.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use unveil_core::character::{next_character_id, Character};
use unveil_core::images::ext_with_dot;
use unveil_core::question::Question;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A character record plus its portrait as a data URL, for listings.
#[derive(Debug, Serialize)]
pub struct CharacterWithImage {
    #[serde(flatten)]
    pub character: Character,
    pub image: Option<String>,
}

/// GET /api/v1/characters
///
/// Returns every character with its original portrait encoded as a
/// base64 data URL (null when the file is unreadable).
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CharacterWithImage>>> {
    let characters = state.store.load_characters().await?;

    let mut out = Vec::with_capacity(characters.len());
    for character in characters {
        let image = unveil_store::images::data_url(Path::new(&character.original_image)).await;
        out.push(CharacterWithImage { character, image });
    }

    Ok(Json(out))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub character: Character,
}

/// Multipart fields accepted by the upload endpoint.
#[derive(Default)]
struct UploadFields {
    name: Option<String>,
    api_key: String,
    prompts: Vec<String>,
    image: Option<(String, axum::body::Bytes)>,
    questions_json: Option<String>,
}

async fn collect_fields(multipart: &mut Multipart) -> AppResult<UploadFields> {
    let mut fields = UploadFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name().unwrap_or_default() {
            "name" => {
                fields.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                )
            }
            "api_key" => {
                fields.api_key = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
            }
            "prompts" => {
                let prompt = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !prompt.trim().is_empty() {
                    fields.prompts.push(prompt);
                }
            }
            "image" => {
                let filename = field.file_name().unwrap_or("upload.png").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                fields.image = Some((filename, bytes));
            }
            "questions_json" => {
                fields.questions_json = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                )
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(fields)
}

/// POST /api/v1/characters
///
/// Upload flow: assign a gap-filling character id, create the
/// character folder, save the original portrait as `0.<ext>`, record
/// the character, then run each edit prompt through the remote agent.
/// Edits are chained -- each prompt starts from the latest successful
/// result -- and a failed edit is logged and skipped, leaving a gap in
/// the numbered sequence. Optional questions are saved (renumbered)
/// alongside. The record and questions land before the edit loop, so
/// an interrupted generation leaves a playable character rather than
/// an orphaned folder.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let fields = collect_fields(&mut multipart).await?;

    let name = fields
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing character name".into()))?;
    let (filename, image_bytes) = fields
        .image
        .ok_or_else(|| AppError::BadRequest("Missing character image".into()))?;

    let mut characters = state.store.load_characters().await?;
    let id = next_character_id(&characters);
    let folder = state.store.create_character_folder(id, &name).await?;

    let ext = ext_with_dot(&filename);
    let original_path = folder.join(format!("0{ext}"));
    tokio::fs::write(&original_path, &image_bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to save upload: {e}")))?;

    let character = Character {
        id,
        name,
        original_image: original_path.to_string_lossy().into_owned(),
        folder: folder.to_string_lossy().into_owned(),
    };
    characters.push(character.clone());
    state.store.save_characters(&characters).await?;

    // Save questions when provided; a parse failure skips them rather
    // than failing the whole upload.
    if let Some(text) = fields.questions_json.filter(|t| !t.trim().is_empty()) {
        match serde_json::from_str::<Vec<Question>>(&text) {
            Ok(questions) => state.store.save_questions(&folder, questions).await?,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid questions_json, skipping");
            }
        }
    }

    tracing::info!(id, name = %character.name, prompt_count = fields.prompts.len(), "Character uploaded");

    // Generate the edit sequence. Each prompt edits the latest
    // successful result, so prompt 3 builds on prompt 2's output.
    let poll = state.poll_config();
    let cancel = CancellationToken::new();
    let mut current = original_path.clone();

    for (idx, prompt) in fields.prompts.iter().enumerate() {
        let idx = idx + 1;
        tracing::info!(idx, total = fields.prompts.len(), "Processing edit prompt");

        let url = match state
            .agent
            .edit_image(&fields.api_key, &current, prompt, &poll, &cancel)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(idx, error = %e, "Edit prompt failed, skipping");
                continue;
            }
        };

        let dest = folder.join(format!("{idx}{ext}"));
        match state.agent.download(&url, &dest).await {
            Ok(()) => {
                tracing::info!(idx, path = %dest.display(), "Edited image saved");
                current = dest;
            }
            Err(e) => {
                tracing::warn!(idx, error = %e, "Failed to download edited image, skipping");
            }
        }
    }

    Ok(Json(UploadResponse {
        message: format!(
            "Character '{}' has been added and images generated successfully!",
            character.name
        ),
        character,
    }))
}
