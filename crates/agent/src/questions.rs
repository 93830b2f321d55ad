//! Streaming question generation against the chat agent.
//!
//! The chat endpoint emits server-sent events whose `data:` payloads
//! carry OpenAI-style `choices[].delta.content` fragments. The
//! fragments are concatenated into one buffer; the stream ends on the
//! `[DONE]` sentinel or a `finish_reason`. The accumulated text is
//! then mined for a JSON array of question objects.

use std::time::Duration;

use serde_json::Value;
use unveil_core::question::Question;

use crate::client::{AgentClient, CHAT_AGENT};
use crate::error::AgentError;
use crate::extract::extract_json_array;

/// Overall timeout for the streaming request, covering connection
/// setup and every chunk read. A trickling stream ends here rather
/// than running unbounded.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(300);

/// What an SSE line means for the consumption loop.
#[derive(Debug, PartialEq, Eq)]
enum StreamSignal {
    Continue,
    Done,
}

/// Process one SSE line, appending any delta content to `buffer`.
///
/// Non-`data:` lines and malformed JSON chunks are skipped, never
/// fatal. `[DONE]` and a populated `finish_reason` both end the
/// stream.
fn process_sse_line(line: &str, buffer: &mut String) -> StreamSignal {
    let Some(data) = line.strip_prefix("data:") else {
        return StreamSignal::Continue;
    };
    let data = data.trim();

    if data == "[DONE]" {
        return StreamSignal::Done;
    }

    let Ok(chunk) = serde_json::from_str::<Value>(data) else {
        return StreamSignal::Continue;
    };

    let choices = chunk
        .get("choices")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    for choice in &choices {
        if let Some(content) = choice
            .get("delta")
            .and_then(|d| d.get("content"))
            .and_then(Value::as_str)
        {
            buffer.push_str(content);
        }

        if choice
            .get("finish_reason")
            .is_some_and(|r| !r.is_null())
        {
            return StreamSignal::Done;
        }
    }

    StreamSignal::Continue
}

/// Build the natural-language instruction prompt for the chat agent.
fn build_prompt(topic: &str, difficulties: &[i64], num_questions: usize) -> String {
    format!(
        r#"Create {num_questions} multiple-choice questions about the topic "{topic}".
Each question must have 4 options and 1 correct answer.
The difficulty levels of the questions are given in this list: {difficulties:?}.

Return the result in pure JSON format, following exactly this structure:
[
{{
"id": 1,
"question": "What is the capital of France?",
"options": ["Paris", "Hanoi", "London", "Berlin"],
"answer": "Paris"
}}
]

Requirements:

The output must be valid JSON (no extra text or explanation).

Each question should match the corresponding difficulty level in the list.

All options should be plausible but only one correct.

Questions and answers must be in English."#
    )
}

impl AgentClient {
    /// Generate `num_questions` quiz questions about `topic` via the
    /// streaming chat endpoint.
    ///
    /// Returns the parsed question list, or an error when the stream
    /// never yields a balanced JSON array -- there is no partial
    /// recovery.
    pub async fn generate_questions(
        &self,
        api_key: &str,
        topic: &str,
        difficulties: &[i64],
        num_questions: usize,
    ) -> Result<Vec<Question>, AgentError> {
        let prompt = build_prompt(topic, difficulties, num_questions);

        let payload = serde_json::json!({
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt }
                    ]
                }
            ],
            "agent": CHAT_AGENT,
            "stream": true,
        });

        tracing::info!(topic, num_questions, "Requesting question generation");

        let response = self
            .http
            .post(&self.prompt_url)
            .header("x-api-key", api_key)
            .header("accept", "text/event-stream")
            .json(&payload)
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;
        let mut response = Self::ensure_success(response).await?;

        let mut pending = String::new();
        let mut content = String::new();
        let mut done = false;

        while !done {
            let Some(chunk) = response.chunk().await? else {
                break;
            };
            pending.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(pos) = pending.find('\n') {
                let mut line: String = pending.drain(..=pos).collect();
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }

                if process_sse_line(&line, &mut content) == StreamSignal::Done {
                    done = true;
                    break;
                }
            }
        }

        tracing::debug!(bytes = content.len(), "Stream complete, extracting questions");

        let array = extract_json_array(&content).ok_or(AgentError::NoJsonArray)?;
        let questions: Vec<Question> = serde_json::from_str(&array)?;

        tracing::info!(count = questions.len(), "Questions generated");
        Ok(questions)
    }
}
