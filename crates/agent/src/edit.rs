//! Image edit requests: submit, then poll for the result.
//!
//! The remote contract: `POST {prompt_url}` with the base64 data-URL
//! image and prompt text returns `{ "request_id": ... }`; `GET
//! {result_url}?agent=...&request_id=...` reports `{ status, log,
//! cdn_url | result_url | result_image_url }` until the job reaches a
//! terminal state.
//!
//! The poll is cancellable, backoff-aware, and bounded by an explicit
//! deadline. Cancellation interrupts even an in-flight HTTP request,
//! and every request carries a timeout derived from the time left, so
//! a remote that accepts the connection and never answers cannot hold
//! the loop past the deadline.

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use unveil_core::images::mime_for_ext;

use crate::client::{AgentClient, EDIT_AGENT};
use crate::error::AgentError;

/// Tunable parameters for the result poll.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the first poll and the starting backoff value.
    pub initial_interval: Duration,
    /// Upper bound on the delay between polls.
    pub max_interval: Duration,
    /// Factor by which the delay grows after each poll.
    pub multiplier: f64,
    /// Total time allowed from submission to a terminal status.
    pub deadline: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(10),
            multiplier: 2.0,
            deadline: Duration::from_secs(300),
        }
    }
}

/// Calculate the next poll interval, clamped to
/// [`PollConfig::max_interval`].
pub fn next_interval(current: Duration, config: &PollConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_interval)
}

/// Pull the job status out of a poll response.
///
/// The remote sometimes reports `status` as a plain string and
/// sometimes as an object with an inner `status` field; both shapes
/// are accepted.
fn job_status(body: &Value) -> Option<&str> {
    match body.get("status") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(obj)) => obj.get("status").and_then(Value::as_str),
        _ => None,
    }
}

/// Result URL from a successful poll response, trying `cdn_url`,
/// `result_url`, and `result_image_url` in that priority order.
fn pick_result_url(body: &Value) -> Option<String> {
    ["cdn_url", "result_url", "result_image_url"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

/// Best-effort progress extraction from the `log` field, which embeds
/// a JSON document with a `progress` percentage when available.
fn parse_progress(body: &Value) -> Option<u64> {
    let log = body.get("log").and_then(Value::as_str)?;
    if !log.contains("\"progress\":") {
        return None;
    }
    let log_json: Value = serde_json::from_str(log).ok()?;
    log_json.get("progress").and_then(Value::as_u64)
}

impl AgentClient {
    /// Submit an image edit and wait for the result URL.
    ///
    /// Reads the image at `image_path`, encodes it as a base64 data
    /// URL with a MIME type judged by extension, submits it together
    /// with `prompt`, then polls until success, failure, timeout, or
    /// cancellation. On success the returned URL points at the edited
    /// image (download it with [`AgentClient::download`]).
    pub async fn edit_image(
        &self,
        api_key: &str,
        image_path: &Path,
        prompt: &str,
        config: &PollConfig,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        let filename = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = image_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime = mime_for_ext(ext);

        let bytes = tokio::fs::read(image_path).await?;
        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));

        let payload = serde_json::json!({
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": data_url,
                                "filename": filename,
                            }
                        },
                        {
                            "type": "text",
                            "text": prompt,
                        }
                    ]
                }
            ],
            "agent": EDIT_AGENT,
        });

        tracing::info!(filename = %filename, "Submitting image edit request");

        // Everything from submission onwards shares one deadline. The
        // per-request timeout covers a remote that accepts the
        // connection and never answers.
        let deadline = Instant::now() + config.deadline;

        let send = self
            .http
            .post(&self.prompt_url)
            .header("x-api-key", api_key)
            .header("accept", "application/json")
            .json(&payload)
            .timeout(config.deadline)
            .send();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(AgentError::Cancelled),
            result = send => match result {
                Ok(response) => response,
                Err(e) if e.is_timeout() => return Err(AgentError::TimedOut(config.deadline)),
                Err(e) => return Err(e.into()),
            },
        };
        let body: Value = Self::ensure_success(response).await?.json().await?;

        let request_id = body
            .get("request_id")
            .and_then(Value::as_str)
            .ok_or(AgentError::MissingRequestId)?
            .to_owned();

        tracing::info!(request_id = %request_id, "Edit request accepted, polling for result");

        self.poll_result(api_key, &request_id, config, deadline, cancel)
            .await
    }

    /// Poll the result endpoint until a terminal status is reached.
    async fn poll_result(
        &self,
        api_key: &str,
        request_id: &str,
        config: &PollConfig,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        let mut interval = config.initial_interval;
        let mut last_progress = 0;
        let poll_url = format!(
            "{}?agent={EDIT_AGENT}&request_id={request_id}",
            self.result_url
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(request_id, "Edit poll cancelled");
                    return Err(AgentError::Cancelled);
                }
                _ = tokio::time::sleep_until(deadline) => {
                    tracing::warn!(request_id, deadline_secs = config.deadline.as_secs(), "Edit poll deadline exceeded");
                    return Err(AgentError::TimedOut(config.deadline));
                }
                _ = tokio::time::sleep(interval) => {}
            }

            // Cap each poll request at the time left, so a connection
            // the remote holds open cannot outlive the deadline.
            let remaining = deadline.saturating_duration_since(Instant::now());
            let send = self
                .http
                .get(&poll_url)
                .header("x-api-key", api_key)
                .timeout(remaining)
                .send();
            let response = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(request_id, "Edit poll cancelled");
                    return Err(AgentError::Cancelled);
                }
                result = send => match result {
                    Ok(response) => response,
                    Err(e) if e.is_timeout() => return Err(AgentError::TimedOut(config.deadline)),
                    Err(e) => return Err(e.into()),
                },
            };
            let body: Value = Self::ensure_success(response).await?.json().await?;

            if let Some(progress) = parse_progress(&body) {
                if progress != last_progress {
                    tracing::debug!(request_id, progress, "Edit progress");
                    last_progress = progress;
                }
            }

            match job_status(&body) {
                Some("success") => {
                    let url = pick_result_url(&body).ok_or_else(|| {
                        AgentError::Failed("success response carried no result URL".into())
                    })?;
                    tracing::info!(request_id, result_url = %url, "Edit complete");
                    return Ok(url);
                }
                Some("failed") => {
                    return Err(AgentError::Failed(body.to_string()));
                }
                _ => {}
            }

            interval = next_interval(interval, config);
        }
    }

    /// Download a result URL to a local file (60-second timeout).
    pub async fn download(&self, url: &str, dest: &Path) -> Result<(), AgentError> {
        let response = self
            .http
            .get(url)
            .timeout(Duration::from_secs(60))
            .send()
            .await?;
        let bytes = Self::ensure_success(response).await?.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_as_plain_string() {
        let body = json!({ "status": "success" });
        assert_eq!(job_status(&body), Some("success"));
    }

    #[test]
    fn status_nested_in_object() {
        let body = json!({ "status": { "status": "failed" } });
        assert_eq!(job_status(&body), Some("failed"));
    }

    #[test]
    fn missing_status_is_none() {
        assert_eq!(job_status(&json!({})), None);
        assert_eq!(job_status(&json!({ "status": 3 })), None);
    }

    #[test]
    fn result_url_priority_order() {
        let body = json!({
            "result_image_url": "http://c",
            "result_url": "http://b",
            "cdn_url": "http://a",
        });
        assert_eq!(pick_result_url(&body), Some("http://a".into()));

        let body = json!({ "result_image_url": "http://c", "result_url": "http://b" });
        assert_eq!(pick_result_url(&body), Some("http://b".into()));

        let body = json!({ "result_image_url": "http://c" });
        assert_eq!(pick_result_url(&body), Some("http://c".into()));
    }

    #[test]
    fn no_result_url_is_none() {
        assert_eq!(pick_result_url(&json!({ "status": "success" })), None);
    }

    #[test]
    fn progress_parsed_from_log_field() {
        let body = json!({ "log": "{\"progress\": 42}" });
        assert_eq!(parse_progress(&body), Some(42));
    }

    #[test]
    fn malformed_log_is_ignored() {
        assert_eq!(parse_progress(&json!({ "log": "\"progress\": oops" })), None);
        assert_eq!(parse_progress(&json!({ "log": "plain text" })), None);
        assert_eq!(parse_progress(&json!({})), None);
    }

    #[test]
    fn backoff_doubles_and_clamps() {
        let config = PollConfig::default();
        let mut interval = config.initial_interval;
        let expected = [1, 2, 4, 8, 10, 10];

        for &secs in &expected {
            assert_eq!(interval.as_secs(), secs);
            interval = next_interval(interval, &config);
        }
    }

    #[tokio::test]
    async fn cancellation_stops_the_poll() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let client = AgentClient::new(
            "http://localhost:1/prompt".into(),
            "http://localhost:1/result".into(),
        );
        let config = PollConfig::default();
        let deadline = Instant::now() + config.deadline;
        let result = client
            .poll_result("key", "req-1", &config, deadline, &cancel)
            .await;

        assert!(matches!(result, Err(AgentError::Cancelled)));
    }

    /// Accepts connections and keeps them open without ever replying.
    async fn hung_listener() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });
        addr
    }

    async fn test_image(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let image = dir.path().join("0.png");
        tokio::fs::write(&image, b"png-bytes").await.unwrap();
        image
    }

    #[tokio::test]
    async fn deadline_bounds_a_connection_the_remote_holds_open() {
        let addr = hung_listener().await;
        let dir = tempfile::tempdir().unwrap();
        let image = test_image(&dir).await;

        let client = AgentClient::new(
            format!("http://{addr}/prompt"),
            format!("http://{addr}/result"),
        );
        let config = PollConfig {
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(50),
            multiplier: 2.0,
            deadline: Duration::from_millis(300),
        };
        let cancel = CancellationToken::new();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.edit_image("key", &image, "prompt", &config, &cancel),
        )
        .await
        .expect("edit must fail at the deadline, not hang");

        assert!(matches!(result, Err(AgentError::TimedOut(_))));
    }

    #[tokio::test]
    async fn cancellation_interrupts_an_in_flight_request() {
        let addr = hung_listener().await;
        let dir = tempfile::tempdir().unwrap();
        let image = test_image(&dir).await;

        let client = AgentClient::new(
            format!("http://{addr}/prompt"),
            format!("http://{addr}/result"),
        );
        let config = PollConfig {
            deadline: Duration::from_secs(60),
            ..PollConfig::default()
        };
        let cancel = CancellationToken::new();
        let handle = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.edit_image("key", &image, "prompt", &config, &cancel),
        )
        .await
        .expect("cancellation must interrupt the in-flight request");

        assert!(matches!(result, Err(AgentError::Cancelled)));
    }
}
