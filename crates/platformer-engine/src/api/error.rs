//! Error types for the fallible edges of the engine.
//!
//! The per-frame simulation never fails; only JSON parsing and explicit
//! property validation surface errors to the host.

use thiserror::Error;

/// Result type alias for engine boundary operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A platformer property violates its invariant.
    #[error("invalid platformer property `{name}`: {reason}")]
    InvalidProperty {
        name: &'static str,
        reason: &'static str,
    },

    /// A host-supplied JSON document could not be parsed.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
