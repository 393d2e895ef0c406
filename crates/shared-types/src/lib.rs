//! # Shared Types Crate
//!
//! Wire primitives used by every subsystem of the pool core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: key, hash and signature widths are defined here.
//! - **Explicit Decoding**: received buffers are never reinterpreted as typed
//!   records; every field is read through a bounds-checked [`ByteReader`].
//! - **Little-Endian Everywhere**: all multi-byte integers on the wire are LE.

pub mod codec;
pub mod entities;
pub mod errors;

pub use codec::{ByteReader, ByteWriter};
pub use entities::*;
pub use errors::*;
