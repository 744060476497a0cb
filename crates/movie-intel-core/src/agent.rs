//! The generative-agent seam.
//!
//! One implementation wraps one model configuration and one instruction
//! profile; the orchestrator only sees prompt text in, response text out.
//! In-memory fakes for tests live in [`crate::fakes`].

use async_trait::async_trait;

/// Errors surfaced by a generation backend.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Backend unreachable, rate-limited, or timed out. Never retried by
    /// the agent itself; the orchestrator decides.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered but produced no usable text.
    #[error("backend returned no usable content: {0}")]
    EmptyResponse(String),
}

/// Result type for agent calls.
pub type AgentResult<T> = std::result::Result<T, AgentError>;

/// A stateless callable wrapping one model configuration and one
/// instruction profile.
///
/// Implementations must not consult any data outside the prompt; that
/// contract is carried by the instruction profile and verified by the
/// validator stage, not enforced here.
#[async_trait]
pub trait GenerativeAgent: Send + Sync {
    /// Generate a response for a non-empty prompt.
    ///
    /// One outbound call per invocation; latency and occasional backend
    /// failure are expected and surface as [`AgentError::Unavailable`].
    async fn run(&self, prompt: &str) -> AgentResult<String>;
}
