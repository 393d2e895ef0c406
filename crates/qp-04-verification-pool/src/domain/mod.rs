//! # Domain Layer

pub mod difficulty;
pub mod entities;
pub mod errors;
pub mod store;
