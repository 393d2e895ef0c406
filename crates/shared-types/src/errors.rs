//! # Error Types
//!
//! Errors raised by the shared byte codec.

use thiserror::Error;

/// Errors that can occur while encoding or decoding fixed-layout fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A read would go past the end of the buffer.
    #[error("Buffer underrun: need {needed} bytes at offset {offset}, only {available} available")]
    Underrun {
        /// Offset of the attempted read.
        offset: usize,
        /// Bytes the field needs.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// A field was supplied with the wrong length.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// A hex string could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
