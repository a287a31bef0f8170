//! Error types for agentskills.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkillsError>;

#[derive(Debug, Error)]
pub enum SkillsError {
    /// Invalid repository spec, unknown assistant, conflicting flags, bad config file.
    #[error("configuration error: {0}")]
    Config(String),

    /// A persona document or domain bundle that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Non-404 HTTP status or transport failure against the remote source.
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Summary of a batch where some (persona, assistant) pairs failed.
    #[error("{failed} of {attempted} install(s) failed")]
    Partial { attempted: usize, failed: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SkillsError {
    /// Errors that abort the invocation before any fetch or write.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Stable machine code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Fetch(_) => "fetch",
            Self::ValidationFailed(_) => "validation_failed",
            Self::Partial { .. } => "partial",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
