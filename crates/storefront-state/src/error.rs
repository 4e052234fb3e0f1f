//! # State Error Types

use thiserror::Error;

/// Result type alias for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors raised by the state container.
///
/// Only two things can fail here: decoding an action from its serialized
/// form, and touching the persisted token.
#[derive(Debug, Error)]
pub enum StateError {
    /// A serialized action carried a tag outside the known set.
    #[error("Unknown action type: {0}")]
    UnknownAction(String),

    /// A serialized action had a known tag but an unusable payload.
    #[error("Invalid payload for action {tag}: {reason}")]
    InvalidPayload { tag: String, reason: String },

    /// No usable location for persisted storage.
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// Reading or writing the storage file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage file is not valid JSON.
    #[error("Storage file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
