//! Quiz question records and answer checking.

use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
///
/// Stored as an ordered array in a character folder's `questions.json`;
/// the array order defines game progression. Ids are 1-based and
/// sequential within a character (enforced by [`renumber`] on save).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    /// Check a submitted answer against the stored one.
    ///
    /// Comparison is whitespace-trimmed and case-insensitive; any
    /// mismatch is a terminal loss for the session.
    pub fn is_correct(&self, submitted: &str) -> bool {
        submitted.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }
}

/// Rewrite question ids to run 1..n in array order.
///
/// Applied whenever a question list is saved, so ids always agree with
/// the positions the game logic indexes by.
pub fn renumber(questions: &mut [Question]) {
    for (idx, q) in questions.iter_mut().enumerate() {
        q.id = idx as i64 + 1;
    }
}
