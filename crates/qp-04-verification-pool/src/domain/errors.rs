//! # Verification Errors

use shared_types::CodecError;
use thiserror::Error;

/// Result type alias for verification pool operations
pub type Result<T> = std::result::Result<T, VerificationError>;

/// Errors raised by the store and the worker pool.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Pop on an empty store
    #[error("No pending solutions")]
    EmptyStore,

    /// Start requested while workers from a previous start are alive
    #[error("Verification pool already running with {workers} workers")]
    AlreadyRunning { workers: usize },

    /// Worker count of zero
    #[error("Verification pool needs at least one worker")]
    NoWorkers,

    /// Scoring function could not be created
    #[error("Scorer initialization failed: {0}")]
    ScorerInit(String),

    /// Worker thread could not be spawned
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(String),

    /// Seed or nonce is not 32 bytes of hex
    #[error("Invalid solution field: {0}")]
    InvalidField(#[from] CodecError),

    /// Identity does not decode to a public key
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),
}
