//! # Request/Response Header
//!
//! Every frame starts with this 8-byte header. The size field is a 24-bit
//! little-endian value that includes the header itself.

use super::errors::{ProtocolError, Result};
use super::message_types::MessageType;
use rand::{Rng, RngCore};
use shared_types::{ByteReader, ByteWriter};

/// Encoded header length in bytes.
pub const HEADER_SIZE: usize = 8;

/// Largest size representable in the 24-bit size field.
pub const MAX_FRAME_SIZE: usize = 0x00FF_FFFF;

/// The 8-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestResponseHeader {
    size: u32,
    message_type: u8,
    dejavu: u32,
}

impl RequestResponseHeader {
    /// Build a header declaring `size` total bytes.
    ///
    /// Fails with `FrameTooLarge` when `size` does not fit 24 bits.
    pub fn new(size: usize, message_type: u8, dejavu: u32) -> Result<Self> {
        if size > MAX_FRAME_SIZE {
            return Err(ProtocolError::FrameTooLarge { size });
        }
        Ok(Self {
            size: size as u32,
            message_type,
            dejavu,
        })
    }

    /// Header for a frame carrying `payload_len` bytes after the header.
    pub fn for_payload(message_type: MessageType, payload_len: usize, dejavu: u32) -> Result<Self> {
        let size = payload_len
            .checked_add(HEADER_SIZE)
            .ok_or(ProtocolError::FrameTooLarge { size: usize::MAX })?;
        Self::new(size, message_type.as_u8(), dejavu)
    }

    /// Parse the first 8 bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(ProtocolError::HeaderTooShort {
                available: bytes.len(),
            });
        }
        let mut reader = ByteReader::new(bytes);
        let size = reader.u24()?;
        let message_type = reader.u8()?;
        let dejavu = reader.u32()?;
        Ok(Self {
            size,
            message_type,
            dejavu,
        })
    }

    /// Append the 8 encoded bytes to `writer`.
    pub fn encode_into(&self, writer: &mut ByteWriter) {
        writer
            .put_u24(self.size & MAX_FRAME_SIZE as u32)
            .put_u8(self.message_type)
            .put_u32(self.dejavu);
    }

    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let size = self.size.to_le_bytes();
        out[..3].copy_from_slice(&size[..3]);
        out[3] = self.message_type;
        out[4..].copy_from_slice(&self.dejavu.to_le_bytes());
        out
    }

    /// Total frame size, header included.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn message_type(&self) -> u8 {
        self.message_type
    }

    pub fn dejavu(&self) -> u32 {
        self.dejavu
    }

    pub fn set_dejavu(&mut self, dejavu: u32) {
        self.dejavu = dejavu;
    }

    /// Broadcast frames carry a zero dejavu.
    pub fn is_dejavu_zero(&self) -> bool {
        self.dejavu == 0
    }

    /// Bytes following the header; zero when the declared size is malformed.
    pub fn payload_size(&self) -> usize {
        self.size().saturating_sub(HEADER_SIZE)
    }

    /// Payload must be exactly `expected` bytes.
    pub fn check_payload_size(&self, expected: usize) -> bool {
        self.size() >= HEADER_SIZE && self.payload_size() == expected
    }

    /// Payload must fall within `min..=max` bytes.
    pub fn check_payload_size_range(&self, min: usize, max: usize) -> bool {
        self.size() >= HEADER_SIZE && (min..=max).contains(&self.payload_size())
    }

    /// Replace the dejavu with a fresh nonzero correlation id.
    pub fn randomize_dejavu(&mut self) {
        self.dejavu = fresh_dejavu();
    }
}

/// Encode a header in one call.
pub fn encode_header(size: usize, message_type: u8, dejavu: u32) -> Result<[u8; HEADER_SIZE]> {
    Ok(RequestResponseHeader::new(size, message_type, dejavu)?.encode())
}

/// Random nonzero correlation id from the thread RNG.
pub fn fresh_dejavu() -> u32 {
    fresh_dejavu_with(&mut rand::thread_rng())
}

/// Random nonzero correlation id from a caller-supplied RNG.
pub fn fresh_dejavu_with<R: RngCore + ?Sized>(rng: &mut R) -> u32 {
    loop {
        let value: u32 = rng.gen();
        if value != 0 {
            return value;
        }
    }
}
