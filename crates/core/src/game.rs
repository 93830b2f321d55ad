//! Pure game progression rules.
//!
//! All session state is derived from request parameters; there is no
//! server-side session object. These functions take the question and
//! image counts for a character plus a 1-based question number and
//! decide what the player sees next.
//!
//! Question number `i` is paired with the image at sorted filename
//! position `i - 1`, so question 1 shows `0.<ext>` (the original
//! upload) rather than the first edit result. That alignment is part
//! of the wire contract and must not be renumbered.

/// Outcome of fetching a question by 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFetch {
    /// Serve the question and image at this 0-based index.
    Question { index: usize },
    /// The number is past the last question; the game is complete.
    Completed,
}

/// Resolve a 1-based question number against the question count.
pub fn fetch_question(question_count: usize, number: i64) -> QuestionFetch {
    if number > question_count as i64 {
        QuestionFetch::Completed
    } else {
        QuestionFetch::Question {
            index: (number - 1) as usize,
        }
    }
}

/// Outcome of a correct answer to question `answered_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerAdvance {
    /// The player has won; serve the last image in sorted order.
    Victory,
    /// Serve the next question and image at this 0-based index.
    Next { index: usize },
}

/// Decide whether a correct answer advances to the next question or
/// ends the game in victory.
///
/// Victory is declared when the next 1-based number exceeds the
/// question count, or exceeds `image_count - 1`. The second bound
/// means the final image is reserved for the victory screen rather
/// than a question -- with no images at all it is trivially satisfied
/// and the victory payload carries no image.
pub fn advance(question_count: usize, image_count: usize, answered_id: i64) -> AnswerAdvance {
    let next_id = answered_id + 1;
    if next_id > question_count as i64 || next_id > image_count as i64 - 1 {
        AnswerAdvance::Victory
    } else {
        AnswerAdvance::Next {
            index: (next_id - 1) as usize,
        }
    }
}
