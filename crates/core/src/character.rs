//! Character records and id/folder assignment rules.

use serde::{Deserialize, Serialize};

use crate::types::CharacterId;

/// A playable character, as persisted in the top-level character list.
///
/// Created once at upload time and never mutated afterwards except by
/// re-saving the whole list. `original_image` points at the `0.<ext>`
/// file inside `folder`; the rest of the folder holds the numbered
/// edit results and `questions.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub original_image: String,
    pub folder: String,
}

/// Assign the next character id: the smallest positive integer not
/// already in use, so deleted ids are re-filled before the sequence
/// grows.
///
/// Given existing ids `{1, 2, 4}` the next id is `3`.
pub fn next_character_id(existing: &[Character]) -> CharacterId {
    let used: std::collections::HashSet<CharacterId> = existing.iter().map(|c| c.id).collect();
    (1..).find(|id| !used.contains(id)).unwrap_or(1)
}

/// Folder naming convention: `{id}_{name}` with the name lowercased
/// and spaces replaced by underscores.
pub fn folder_name(id: CharacterId, name: &str) -> String {
    let safe_name = name.trim().to_lowercase().replace(' ', "_");
    format!("{id}_{safe_name}")
}
