//! # Adapters

pub mod k12_scorer;
