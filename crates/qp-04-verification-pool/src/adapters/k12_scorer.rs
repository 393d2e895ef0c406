//! # K12 Development Scorer
//!
//! Deterministic stand-in for the production scoring algorithm: the score is
//! derived from `K12(mining_seed || public_key || nonce)` and spread over
//! `0..=max_score`. It follows the same seed/evaluate contract so the worker
//! pool can run end to end without the production scorer.

use crate::domain::errors::Result;
use crate::ports::outbound::{ScorerFactory, ScoringFunction};
use shared_crypto::K12Hasher;
use shared_types::{Hash, PublicKey};

/// K12-based scorer.
#[derive(Debug, Clone)]
pub struct K12Scorer {
    max_score: u32,
    seed: Option<Hash>,
}

impl K12Scorer {
    pub fn new(max_score: u32) -> Self {
        Self {
            max_score,
            seed: None,
        }
    }

    /// Seed currently loaded, if any.
    pub fn current_seed(&self) -> Option<&Hash> {
        self.seed.as_ref()
    }
}

impl ScoringFunction for K12Scorer {
    fn seed(&mut self, mining_seed: &Hash) {
        self.seed = Some(*mining_seed);
    }

    fn evaluate(&mut self, public_key: &PublicKey, mining_seed: &Hash, nonce: &Hash) -> u32 {
        let mut hasher = K12Hasher::new();
        hasher.update(mining_seed).update(public_key).update(nonce);
        let digest = hasher.finalize();
        let raw = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
        raw % self.max_score.saturating_add(1).max(1)
    }

    fn is_valid_score(&self, score: u32) -> bool {
        score <= self.max_score
    }

    fn is_good_score(&self, score: u32, threshold: u32) -> bool {
        score >= threshold
    }
}

/// Factory for [`K12Scorer`].
#[derive(Debug, Clone, Copy)]
pub struct K12ScorerFactory {
    pub max_score: u32,
}

impl Default for K12ScorerFactory {
    fn default() -> Self {
        Self { max_score: 1024 }
    }
}

impl ScorerFactory for K12ScorerFactory {
    fn create(&self) -> Result<Box<dyn ScoringFunction>> {
        Ok(Box::new(K12Scorer::new(self.max_score)))
    }
}
