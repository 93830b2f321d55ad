//! Clients for the remote agent API.
//!
//! Two operations are consumed:
//!
//! - **Image editing**: submit an image plus a free-text prompt to the
//!   agentic edit endpoint, receive a `request_id`, then poll the
//!   result endpoint until the edit succeeds, fails, or the deadline
//!   passes ([`AgentClient::edit_image`]).
//! - **Question generation**: submit a topic/difficulty specification
//!   to the streaming chat endpoint, accumulate the SSE deltas, and
//!   extract a JSON array of questions from the accumulated text
//!   ([`AgentClient::generate_questions`]).

pub mod client;
pub mod edit;
pub mod error;
pub mod extract;
pub mod questions;

pub use client::AgentClient;
pub use edit::PollConfig;
pub use error::AgentError;
