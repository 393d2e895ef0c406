//! # Fixed-Layout Payload Records
//!
//! Explicit field-by-field encoders for the records that follow a header.

use super::errors::{ProtocolError, Result};
use shared_types::{ByteReader, ByteWriter, Hash, PublicKey, Tick};

/// Message block of a solution broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastMessage {
    pub source_public_key: PublicKey,
    pub destination_public_key: PublicKey,
    pub gamming_nonce: Hash,
}

impl BroadcastMessage {
    pub const SIZE: usize = 96;

    pub fn encode_into(&self, writer: &mut ByteWriter) {
        writer
            .put_bytes(&self.source_public_key)
            .put_bytes(&self.destination_public_key)
            .put_bytes(&self.gamming_nonce);
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        if reader.remaining() < Self::SIZE {
            return Err(ProtocolError::PayloadSize {
                expected: Self::SIZE,
                actual: reader.remaining(),
            });
        }
        Ok(Self {
            source_public_key: reader.array32()?,
            destination_public_key: reader.array32()?,
            gamming_nonce: reader.array32()?,
        })
    }
}

/// Transaction record preceding a procedure input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRecord {
    pub source_public_key: PublicKey,
    pub destination_public_key: PublicKey,
    pub amount: i64,
    pub tick: Tick,
    pub input_type: u16,
    pub input_size: u16,
}

impl TransactionRecord {
    pub const SIZE: usize = 80;

    pub fn encode_into(&self, writer: &mut ByteWriter) {
        writer
            .put_bytes(&self.source_public_key)
            .put_bytes(&self.destination_public_key)
            .put_i64(self.amount)
            .put_u32(self.tick)
            .put_u16(self.input_type)
            .put_u16(self.input_size);
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        if reader.remaining() < Self::SIZE {
            return Err(ProtocolError::PayloadSize {
                expected: Self::SIZE,
                actual: reader.remaining(),
            });
        }
        Ok(Self {
            source_public_key: reader.array32()?,
            destination_public_key: reader.array32()?,
            amount: reader.i64()?,
            tick: reader.u32()?,
            input_type: reader.u16()?,
            input_size: reader.u16()?,
        })
    }
}
