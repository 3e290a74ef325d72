//! Error types for the combine tracker
//!
//! The scoring engine itself is fail-soft and never returns these; they are
//! raised by the storage, service and configuration boundaries around it.

use crate::types::{AttemptId, PlayerId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific combine scenarios
#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Drill result not found: {attempt_id}")]
    AttemptNotFound { attempt_id: AttemptId },

    #[error("Invalid player: {reason}")]
    InvalidPlayer { reason: String },

    #[error("Invalid age group '{input}': {reason}. Use 'min-max', e.g. '6-8'")]
    InvalidAgeGroup { input: String, reason: String },

    #[error("Unknown drill type: {name}")]
    UnknownDrill { name: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}
