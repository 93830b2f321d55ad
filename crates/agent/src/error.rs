#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API returned a non-2xx status code.
    #[error("Agent API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The submit response carried no `request_id`; terminal for this
    /// call, no retry.
    #[error("No request_id returned from agent API")]
    MissingRequestId,

    /// The remote reported the edit job as failed.
    #[error("Generation failed: {0}")]
    Failed(String),

    /// The poll deadline elapsed without a terminal status.
    #[error("Timed out after {0:?} waiting for generation result")]
    TimedOut(std::time::Duration),

    /// The caller cancelled the poll.
    #[error("Generation cancelled")]
    Cancelled,

    /// The streamed content never contained a balanced `[ { ... } ]`
    /// JSON array.
    #[error("No JSON array found in generated content")]
    NoJsonArray,

    /// The extracted array was not valid question JSON.
    #[error("Failed to parse generated questions: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file I/O failed (reading the source image, writing a
    /// downloaded result).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
