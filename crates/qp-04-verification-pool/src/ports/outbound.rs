//! # Outbound Ports (Driven Ports / SPI)
//!
//! The scoring algorithm is external. A factory creates one instance per
//! worker; instances are never shared between threads, so
//! [`ScoringFunction`] does not require `Send` or `Sync`.

use crate::domain::errors::Result;
use shared_types::{Hash, PublicKey};

/// Solution scoring algorithm.
///
/// Working memory is released when the instance is dropped.
pub trait ScoringFunction {
    /// Prepare for solutions mined against `mining_seed`.
    fn seed(&mut self, mining_seed: &Hash);

    /// Score a solution nonce for `public_key`.
    fn evaluate(&mut self, public_key: &PublicKey, mining_seed: &Hash, nonce: &Hash) -> u32;

    /// Score lies inside the algorithm's valid range.
    fn is_valid_score(&self, score: u32) -> bool;

    /// Score meets `threshold`.
    fn is_good_score(&self, score: u32, threshold: u32) -> bool;
}

/// Creates scoring function instances for worker threads.
pub trait ScorerFactory: Send + Sync {
    /// Allocate and initialize a scorer. Called once per worker, on the
    /// worker's own thread.
    fn create(&self) -> Result<Box<dyn ScoringFunction>>;
}
