//! Game session endpoints.
//!
//! There is no server-side session object: every request carries the
//! character id and question number, and the reply is derived from the
//! flat files alone. Game-flow failures (unknown character, missing
//! questions, wrong answer) are embedded string messages in a 200
//! response, matching the frontend contract; infrastructure failures
//! surface as `AppError`.

use std::path::Path as FilePath;

use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use unveil_core::game::{advance, fetch_question, AnswerAdvance, QuestionFetch};
use unveil_core::question::Question;
use unveil_store::StoreError;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    pub character_id: i64,
}

/// Reply to a question fetch. Untagged: each variant has a distinct
/// field set on the wire.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuestionReply {
    Error {
        error: String,
    },
    Done {
        done: bool,
        message: String,
    },
    Question {
        question: Question,
        image: Option<String>,
        character_name: String,
    },
}

impl QuestionReply {
    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// POST /api/v1/game/question/{qid}
///
/// Returns the question at 1-based position `qid` together with the
/// image at sorted filename position `qid - 1`. Past the last question
/// the game is reported complete.
pub async fn get_question(
    State(state): State<AppState>,
    Path(qid): Path<i64>,
    Form(form): Form<QuestionForm>,
) -> AppResult<Json<QuestionReply>> {
    if qid < 1 {
        return Ok(Json(QuestionReply::error("Invalid question number!")));
    }

    let Some(character) = state.store.find_character(form.character_id).await? else {
        return Ok(Json(QuestionReply::error("Character not found!")));
    };

    let folder = FilePath::new(&character.folder);
    let questions = match state.store.load_questions(folder).await {
        Ok(questions) => questions,
        Err(e @ StoreError::QuestionsMissing { .. }) => {
            return Ok(Json(QuestionReply::error(e.to_string())));
        }
        Err(e) => return Err(e.into()),
    };

    match fetch_question(questions.len(), qid) {
        QuestionFetch::Completed => Ok(Json(QuestionReply::Done {
            done: true,
            message: "You have completed the game!".into(),
        })),
        QuestionFetch::Question { index } => {
            let images = state.store.list_images(folder).await?;
            let image = match images.get(index) {
                Some(name) => unveil_store::images::data_url(&folder.join(name)).await,
                None => None,
            };

            Ok(Json(QuestionReply::Question {
                question: questions[index].clone(),
                image,
                character_name: character.name,
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub question_id: i64,
    pub answer: String,
    pub character_id: i64,
}

/// Reply to an answer submission. Untagged: victory carries an
/// explicit null `next_question`, progression carries a populated one,
/// and failures carry only a message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnswerReply {
    Failure {
        correct: bool,
        message: String,
    },
    Victory {
        correct: bool,
        message: String,
        next_question: Option<Question>,
        next_image: Option<String>,
    },
    Next {
        correct: bool,
        next_question: Question,
        next_image: Option<String>,
    },
}

impl AnswerReply {
    fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            correct: false,
            message: message.into(),
        }
    }
}

/// POST /api/v1/game/answer
///
/// Checks the submitted answer (case-insensitive, whitespace-trimmed).
/// Any mismatch is a terminal loss. A correct answer either advances
/// to the next question with its aligned image, or -- when the next
/// number exceeds the question count or the image count minus one --
/// declares victory and reveals the last image in sorted order.
pub async fn submit_answer(
    State(state): State<AppState>,
    Form(form): Form<AnswerForm>,
) -> AppResult<Json<AnswerReply>> {
    let Some(character) = state.store.find_character(form.character_id).await? else {
        return Ok(Json(AnswerReply::failure("Character not found!")));
    };

    let folder = FilePath::new(&character.folder);
    let questions = match state.store.load_questions(folder).await {
        Ok(questions) => questions,
        Err(e @ StoreError::QuestionsMissing { .. }) => {
            return Ok(Json(AnswerReply::failure(e.to_string())));
        }
        Err(e) => return Err(e.into()),
    };

    let Some(question) = form
        .question_id
        .checked_sub(1)
        .and_then(|idx| usize::try_from(idx).ok())
        .and_then(|idx| questions.get(idx))
    else {
        return Ok(Json(AnswerReply::failure("Question not found!")));
    };

    if !question.is_correct(&form.answer) {
        return Ok(Json(AnswerReply::failure("Wrong answer! Game Over.")));
    }

    let images = state.store.list_images(folder).await?;

    match advance(questions.len(), images.len(), form.question_id) {
        AnswerAdvance::Victory => {
            let next_image = match images.last() {
                Some(name) => unveil_store::images::data_url(&folder.join(name)).await,
                None => None,
            };

            Ok(Json(AnswerReply::Victory {
                correct: true,
                message: "Congratulations! You won!".into(),
                next_question: None,
                next_image,
            }))
        }
        AnswerAdvance::Next { index } => {
            let next_image = match images.get(index) {
                Some(name) => unveil_store::images::data_url(&folder.join(name)).await,
                None => None,
            };

            Ok(Json(AnswerReply::Next {
                correct: true,
                next_question: questions[index].clone(),
                next_image,
            }))
        }
    }
}
