//! # Domain Layer
//!
//! Keystream derivation and packet assembly. No I/O.

pub mod errors;
pub mod keystream;
pub mod opener;
pub mod packet;
