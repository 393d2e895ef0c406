//! # Wire Protocol Subsystem (QP-01)
//!
//! Bit-exact encoding of the frames exchanged with a network node.
//!
//! ## Frame Layout
//!
//! ```text
//! ┌──────────────┬──────────┬────────────┬───────────────────────────┐
//! │ size (u24 LE)│ type (u8)│ dejavu (u32)│ payload (size - 8 bytes) │
//! └──────────────┴──────────┴────────────┴───────────────────────────┘
//! ```
//!
//! - `size` counts the header itself and never exceeds `0xFFFFFF`.
//! - `dejavu == 0` marks a fire-and-forget broadcast; a nonzero value
//!   correlates a request with its response.
//!
//! ## Architecture
//!
//! Pure domain layer, no I/O:
//! - `domain/header.rs`: 8-byte header codec and correlation ids
//! - `domain/message_types.rs`: the `type` byte registry
//! - `domain/packets.rs`: fixed-layout payload records
//! - `domain/contracts.rs`: contract-function invocation frames
//! - `domain/frames.rs`: bounded iteration over concatenated frames
//! - `domain/system_info.rs`: system-info snapshot and stream parser

pub mod domain;

// Re-export public API
pub use domain::contracts::{
    contract_address, BurnQubicInput, ContractFunctionRequest, ContractFunctionResponse,
    UtilFunction, UtilProcedure, UTIL_CONTRACT_INDEX,
};
pub use domain::errors::{ProtocolError, Result};
pub use domain::frames::{Frame, FrameIter};
pub use domain::header::{
    encode_header, fresh_dejavu, fresh_dejavu_with, RequestResponseHeader, HEADER_SIZE,
    MAX_FRAME_SIZE,
};
pub use domain::message_types::MessageType;
pub use domain::packets::{BroadcastMessage, TransactionRecord};
pub use domain::system_info::{
    parse_system_info, system_info_request, SystemInfo, SYSTEM_INFO_SIZE,
};
