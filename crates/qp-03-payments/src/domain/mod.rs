//! # Domain Layer

pub mod errors;
pub mod recipients;
pub mod transaction;
