//! # Protocol Errors
//!
//! Decode and encode failures for wire frames.

use shared_types::CodecError;
use thiserror::Error;

/// Result type alias for wire protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while building or parsing frames.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Declared frame size does not fit in 24 bits
    #[error("Frame too large: {size} bytes exceeds 0xFFFFFF")]
    FrameTooLarge { size: usize },

    /// Fewer than 8 bytes available for a header
    #[error("Header too short: {available} bytes available")]
    HeaderTooShort { available: usize },

    /// Declared size is smaller than the header itself
    #[error("Invalid declared frame size {size} at offset {offset}")]
    InvalidDeclaredSize { offset: usize, size: u32 },

    /// Declared size reads past the received buffer
    #[error("Frame at offset {offset} declares {declared} bytes, only {available} available")]
    FrameOverrun {
        offset: usize,
        declared: u32,
        available: usize,
    },

    /// Frame type differs from the one expected
    #[error("Unexpected frame type: expected {expected}, got {actual}")]
    UnexpectedType { expected: u8, actual: u8 },

    /// Payload length does not match the record layout
    #[error("Payload size mismatch: expected {expected}, got {actual}")]
    PayloadSize { expected: usize, actual: usize },

    /// No frame of the requested type in the stream
    #[error("No frame of type {message_type} in stream")]
    NotFound { message_type: u8 },

    /// Variable-size input does not fit its u16 length field
    #[error("Input too large: {len} bytes exceeds u16 length field")]
    InputTooLarge { len: usize },

    /// Field-level decode failure
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}
