//! # System Info
//!
//! Snapshot of the node's current state, returned for a header-only
//! request of type 46.

use super::errors::{ProtocolError, Result};
use super::frames::FrameIter;
use super::header::{RequestResponseHeader, HEADER_SIZE};
use super::message_types::MessageType;
use shared_types::{ByteReader, Hash, Tick};
use tracing::{debug, warn};

/// Encoded snapshot length.
pub const SYSTEM_INFO_SIZE: usize = 68;

/// Node system info snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemInfo {
    pub version: i16,
    pub epoch: u16,
    pub tick: Tick,
    pub initial_tick: Tick,
    pub latest_created_tick: Tick,
    pub initial_millisecond: u16,
    pub initial_second: u8,
    pub initial_minute: u8,
    pub initial_hour: u8,
    pub initial_day: u8,
    pub initial_month: u8,
    pub initial_year: u8,
    pub number_of_entities: u32,
    pub number_of_transactions: u32,
    pub random_mining_seed: Hash,
    pub solution_threshold: i32,
}

impl SystemInfo {
    /// Decode a 68-byte payload.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < SYSTEM_INFO_SIZE {
            return Err(ProtocolError::PayloadSize {
                expected: SYSTEM_INFO_SIZE,
                actual: payload.len(),
            });
        }
        let mut r = ByteReader::new(payload);
        Ok(Self {
            version: r.i16()?,
            epoch: r.u16()?,
            tick: r.u32()?,
            initial_tick: r.u32()?,
            latest_created_tick: r.u32()?,
            initial_millisecond: r.u16()?,
            initial_second: r.u8()?,
            initial_minute: r.u8()?,
            initial_hour: r.u8()?,
            initial_day: r.u8()?,
            initial_month: r.u8()?,
            initial_year: r.u8()?,
            number_of_entities: r.u32()?,
            number_of_transactions: r.u32()?,
            random_mining_seed: r.array32()?,
            solution_threshold: r.i32()?,
        })
    }

    pub fn encode(&self) -> [u8; SYSTEM_INFO_SIZE] {
        let mut w = shared_types::ByteWriter::with_capacity(SYSTEM_INFO_SIZE);
        w.put_i16(self.version)
            .put_u16(self.epoch)
            .put_u32(self.tick)
            .put_u32(self.initial_tick)
            .put_u32(self.latest_created_tick)
            .put_u16(self.initial_millisecond)
            .put_u8(self.initial_second)
            .put_u8(self.initial_minute)
            .put_u8(self.initial_hour)
            .put_u8(self.initial_day)
            .put_u8(self.initial_month)
            .put_u8(self.initial_year)
            .put_u32(self.number_of_entities)
            .put_u32(self.number_of_transactions)
            .put_bytes(&self.random_mining_seed)
            .put_i32(self.solution_threshold);
        let mut out = [0u8; SYSTEM_INFO_SIZE];
        out.copy_from_slice(w.as_slice());
        out
    }
}

/// Header-only system info request frame.
pub fn system_info_request(dejavu: u32) -> Result<[u8; HEADER_SIZE]> {
    Ok(RequestResponseHeader::for_payload(MessageType::RequestSystemInfo, 0, dejavu)?.encode())
}

/// Find the first system info response in a raw receive buffer.
///
/// Frames of other types are skipped. A malformed frame before the first
/// match ends the scan with its error.
pub fn parse_system_info(stream: &[u8]) -> Result<SystemInfo> {
    let wanted = MessageType::RespondSystemInfo.as_u8();
    for frame in FrameIter::new(stream) {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "[qp-01] Malformed frame while scanning for system info");
                return Err(e);
            }
        };
        if frame.header.message_type() != wanted {
            debug!(
                message_type = frame.header.message_type(),
                size = frame.header.size(),
                "[qp-01] Skipping frame"
            );
            continue;
        }
        return SystemInfo::decode(frame.payload);
    }
    Err(ProtocolError::NotFound {
        message_type: wanted,
    })
}
