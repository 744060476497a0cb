//! Error taxonomy for the movie intelligence pipeline.

/// Errors produced anywhere in the pipeline or its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum MovieIntelError {
    /// Neither metadata nor financial source yielded usable data.
    /// Fatal; raised before any agent is invoked.
    #[error("insufficient source data: {0}")]
    InsufficientData(String),

    /// A generative backend call failed or timed out.
    #[error("agent unavailable at stage '{stage}': {cause}")]
    AgentUnavailable { stage: String, cause: String },

    /// The metadata source reported no match for the requested title.
    #[error("movie not found: {0}")]
    SourceNotFound(String),

    /// A provider response could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The report sink failed to produce an artifact. Never invalidates
    /// the computed run.
    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, MovieIntelError>;
