//! # Solution Crypto Errors

use qp_01_wire_protocol::ProtocolError;
use shared_crypto::CryptoError;
use shared_types::CodecError;
use thiserror::Error;

/// Result type alias for solution crypto operations
pub type Result<T> = std::result::Result<T, SolutionCryptoError>;

/// Errors raised while building or opening solution packets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolutionCryptoError {
    /// A key, seed or nonce argument had the wrong width
    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No nonce produced a gamming key with a zero first byte
    #[error("Keystream derivation exhausted after {attempts} attempts")]
    KeystreamExhausted { attempts: u32 },

    /// Packet buffer is not a complete solution broadcast
    #[error("Invalid solution packet size: expected {expected}, got {actual}")]
    InvalidPacketSize { expected: usize, actual: usize },

    /// Gamming key marks a different message sub-type
    #[error("Not a solution message: gamming key starts with {first_byte}")]
    NotSolutionMessage { first_byte: u8 },

    /// Signature, key or key agreement failure
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Header or field decode failure
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Packet field could not be read
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl SolutionCryptoError {
    pub(crate) fn length(field: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            field,
            expected,
            actual,
        }
    }
}
