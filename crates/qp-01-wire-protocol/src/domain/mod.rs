//! # Domain Layer
//!
//! Pure encoding logic with no I/O dependencies.

pub mod contracts;
pub mod errors;
pub mod frames;
pub mod header;
pub mod message_types;
pub mod packets;
pub mod system_info;
