use std::path::PathBuf;

use unveil_agent::client::{DEFAULT_PROMPT_URL, DEFAULT_RESULT_URL};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root of the flat-file data directory (default: `data`).
    pub data_dir: PathBuf,
    /// Plaintext admin password file (default: `password_admin.txt`).
    pub password_file: PathBuf,
    /// Prompt-suggestion list (default: `prompts.json`).
    pub prompts_file: PathBuf,
    /// Default background image (default: `default_background.jpg`).
    pub background_file: PathBuf,
    /// Remote agent submission endpoint.
    pub agent_prompt_url: String,
    /// Remote agent result-polling endpoint.
    pub agent_result_url: String,
    /// Per-edit polling deadline in seconds (default: `300`).
    pub edit_deadline_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `DATA_DIR`             | `data`                      |
    /// | `PASSWORD_FILE`        | `password_admin.txt`        |
    /// | `PROMPTS_FILE`         | `prompts.json`              |
    /// | `BACKGROUND_FILE`      | `default_background.jpg`    |
    /// | `AGENT_PROMPT_URL`     | production agent endpoint   |
    /// | `AGENT_RESULT_URL`     | production result endpoint  |
    /// | `EDIT_DEADLINE_SECS`   | `300`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into()));

        let password_file = PathBuf::from(
            std::env::var("PASSWORD_FILE").unwrap_or_else(|_| "password_admin.txt".into()),
        );

        let prompts_file =
            PathBuf::from(std::env::var("PROMPTS_FILE").unwrap_or_else(|_| "prompts.json".into()));

        let background_file = PathBuf::from(
            std::env::var("BACKGROUND_FILE").unwrap_or_else(|_| "default_background.jpg".into()),
        );

        let agent_prompt_url =
            std::env::var("AGENT_PROMPT_URL").unwrap_or_else(|_| DEFAULT_PROMPT_URL.into());

        let agent_result_url =
            std::env::var("AGENT_RESULT_URL").unwrap_or_else(|_| DEFAULT_RESULT_URL.into());

        let edit_deadline_secs: u64 = std::env::var("EDIT_DEADLINE_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("EDIT_DEADLINE_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_dir,
            password_file,
            prompts_file,
            background_file,
            agent_prompt_url,
            agent_result_url,
            edit_deadline_secs,
        }
    }
}
