use std::sync::Arc;

use unveil_agent::{AgentClient, PollConfig};
use unveil_store::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). There is
/// deliberately no other process-wide mutable state; everything a
/// request needs is derived from its parameters and the flat files.
#[derive(Clone)]
pub struct AppState {
    /// Flat-file store (characters, questions, images).
    pub store: Arc<Store>,
    /// Remote agent API client (image edits, question generation).
    pub agent: Arc<AgentClient>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Poll configuration for edit requests, with the deadline taken
    /// from server config.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            deadline: std::time::Duration::from_secs(self.config.edit_deadline_secs),
            ..PollConfig::default()
        }
    }
}
