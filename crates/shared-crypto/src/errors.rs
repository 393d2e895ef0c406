//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret seed is not 55 lowercase letters
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Identity string failed to decode
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Identity checksum does not match its key
    #[error("Identity checksum mismatch")]
    ChecksumMismatch,
}
