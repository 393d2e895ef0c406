//! # Ports

pub mod outbound;
