//! Character and question persistence rooted at a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use unveil_core::character::{folder_name, Character};
use unveil_core::images::is_image_file;
use unveil_core::question::{renumber, Question};
use unveil_core::types::CharacterId;

use crate::error::StoreError;

/// Filename of the per-character question list inside each folder.
pub const QUESTIONS_FILE: &str = "questions.json";

/// Filename of the top-level character list.
pub const CHARACTERS_FILE: &str = "characters.json";

/// Flat-file store rooted at a data directory.
///
/// Layout:
///
/// ```text
/// {root}/characters.json            character list (JSON array)
/// {root}/uploads/{id}_{name}/       one folder per character
///     0.<ext>                       original upload
///     1.<ext>, 2.<ext>, ...         edit results in prompt order
///     questions.json                ordered question list
/// ```
///
/// Writes are plain overwrites with no locking or rename step; the
/// deployment assumption is a single process handling one request at
/// a time.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the top-level character list.
    pub fn characters_path(&self) -> PathBuf {
        self.root.join(CHARACTERS_FILE)
    }

    /// Directory holding all character folders.
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// Create the root and uploads directories if they do not exist.
    pub async fn init(&self) -> Result<(), StoreError> {
        let uploads = self.uploads_dir();
        tokio::fs::create_dir_all(&uploads)
            .await
            .map_err(|e| StoreError::io(&uploads, e))?;
        Ok(())
    }

    // ---- character list ----

    /// Load the full character list.
    ///
    /// A missing file is treated as an empty list and created on the
    /// spot, so a fresh data directory works without seeding.
    pub async fn load_characters(&self) -> Result<Vec<Character>, StoreError> {
        let path = self.characters_path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.save_characters(&[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| StoreError::json(&path, e))
    }

    /// Overwrite the full character list.
    pub async fn save_characters(&self, characters: &[Character]) -> Result<(), StoreError> {
        let path = self.characters_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(characters)
            .map_err(|e| StoreError::json(&path, e))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| StoreError::io(&path, e))
    }

    /// Look up a character by id.
    pub async fn find_character(
        &self,
        id: CharacterId,
    ) -> Result<Option<Character>, StoreError> {
        let characters = self.load_characters().await?;
        Ok(characters.into_iter().find(|c| c.id == id))
    }

    /// Create (and return the path of) the folder for a new character.
    pub async fn create_character_folder(
        &self,
        id: CharacterId,
        name: &str,
    ) -> Result<PathBuf, StoreError> {
        let folder = self.uploads_dir().join(folder_name(id, name));
        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|e| StoreError::io(&folder, e))?;
        Ok(folder)
    }

    // ---- questions ----

    /// Load the ordered question list from a character folder.
    pub async fn load_questions(&self, folder: &Path) -> Result<Vec<Question>, StoreError> {
        let path = folder.join(QUESTIONS_FILE);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::QuestionsMissing {
                    folder: folder.to_path_buf(),
                })
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| StoreError::json(&path, e))
    }

    /// Save a question list into a character folder, renumbering ids
    /// to 1..n in array order first.
    pub async fn save_questions(
        &self,
        folder: &Path,
        mut questions: Vec<Question>,
    ) -> Result<(), StoreError> {
        renumber(&mut questions);
        let path = folder.join(QUESTIONS_FILE);
        let json =
            serde_json::to_string_pretty(&questions).map_err(|e| StoreError::json(&path, e))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| StoreError::io(&path, e))
    }

    // ---- images ----

    /// List image filenames in a character folder, lexicographically
    /// sorted.
    ///
    /// The sorted order is what aligns image position `i` with
    /// question number `i + 1`; gaps left by failed edits shift later
    /// images down rather than leaving holes.
    pub async fn list_images(&self, folder: &Path) -> Result<Vec<String>, StoreError> {
        let mut entries = tokio::fs::read_dir(folder)
            .await
            .map_err(|e| StoreError::io(folder, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(folder, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_image_file(&name) {
                files.push(name);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        (dir, store)
    }

    fn sample_question(id: i64, answer: &str) -> Question {
        Question {
            id,
            question: format!("Question {id}?"),
            options: vec![
                answer.to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            answer: answer.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_character_list_loads_as_empty_and_is_created() {
        let (_dir, store) = test_store();

        let characters = store.load_characters().await.unwrap();
        assert!(characters.is_empty());
        assert!(store.characters_path().exists());
    }

    #[tokio::test]
    async fn character_list_round_trips() {
        let (_dir, store) = test_store();
        let characters = vec![Character {
            id: 1,
            name: "Ada".into(),
            original_image: "uploads/1_ada/0.png".into(),
            folder: "uploads/1_ada".into(),
        }];

        store.save_characters(&characters).await.unwrap();
        let loaded = store.load_characters().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1);
        assert_eq!(loaded[0].name, "Ada");
    }

    #[tokio::test]
    async fn find_character_by_id() {
        let (_dir, store) = test_store();
        let characters = vec![
            Character {
                id: 1,
                name: "Ada".into(),
                original_image: String::new(),
                folder: String::new(),
            },
            Character {
                id: 3,
                name: "Grace".into(),
                original_image: String::new(),
                folder: String::new(),
            },
        ];
        store.save_characters(&characters).await.unwrap();

        assert_eq!(store.find_character(3).await.unwrap().unwrap().name, "Grace");
        assert!(store.find_character(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_questions_file_is_a_distinct_error() {
        let (_dir, store) = test_store();
        let folder = store.create_character_folder(1, "Ada").await.unwrap();

        let err = store.load_questions(&folder).await.unwrap_err();
        assert_matches!(err, StoreError::QuestionsMissing { .. });
    }

    #[tokio::test]
    async fn questions_are_renumbered_on_save() {
        let (_dir, store) = test_store();
        let folder = store.create_character_folder(1, "Ada").await.unwrap();

        let questions = vec![sample_question(9, "Paris"), sample_question(9, "Cat")];
        store.save_questions(&folder, questions).await.unwrap();

        let loaded = store.load_questions(&folder).await.unwrap();
        let ids: Vec<i64> = loaded.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn list_images_sorts_and_filters() {
        let (_dir, store) = test_store();
        let folder = store.create_character_folder(1, "Ada").await.unwrap();

        for name in ["2.png", "0.png", "1.png", "questions.json", "notes.txt"] {
            tokio::fs::write(folder.join(name), b"x").await.unwrap();
        }

        let images = store.list_images(&folder).await.unwrap();
        assert_eq!(images, vec!["0.png", "1.png", "2.png"]);
    }

    #[tokio::test]
    async fn character_folder_uses_naming_convention() {
        let (dir, store) = test_store();
        let folder = store.create_character_folder(2, "Ada Lovelace").await.unwrap();

        assert_eq!(
            folder,
            dir.path().join("uploads").join("2_ada_lovelace")
        );
        assert!(folder.is_dir());
    }
}
