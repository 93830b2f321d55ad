//! HTTP client handle for the remote agent API.

use crate::error::AgentError;

/// Default prompt (submission) endpoint.
pub const DEFAULT_PROMPT_URL: &str = "https://agentic.eternalai.org/prompt";

/// Default result (polling) endpoint.
pub const DEFAULT_RESULT_URL: &str = "https://agent-api.eternalai.org/result";

/// Agent name used for image edit requests.
pub const EDIT_AGENT: &str = "uncensored-reimagine";

/// Agent name used for streaming question generation.
pub const CHAT_AGENT: &str = "uncensored-chat";

/// Client for the remote agent API.
///
/// Holds a pooled [`reqwest::Client`] plus the two endpoint URLs. The
/// API key is per-call rather than per-client because the operator
/// supplies it with each upload.
#[derive(Debug, Clone)]
pub struct AgentClient {
    pub(crate) http: reqwest::Client,
    pub(crate) prompt_url: String,
    pub(crate) result_url: String,
}

impl Default for AgentClient {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_URL.into(), DEFAULT_RESULT_URL.into())
    }
}

impl AgentClient {
    /// Create a client with explicit endpoint URLs (tests point these
    /// at a local stub; production uses the defaults).
    pub fn new(prompt_url: String, result_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            prompt_url,
            result_url,
        }
    }

    pub fn prompt_url(&self) -> &str {
        &self.prompt_url
    }

    pub fn result_url(&self) -> &str {
        &self.result_url
    }

    /// Ensure a response has a success status code, or convert it into
    /// an [`AgentError::Api`] carrying the status and body text.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AgentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AgentError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
