//! # Score Classification
//!
//! A scored solution counts as a *share* when it reaches the pool
//! difficulty and as a *solution* when it reaches the network difficulty.
//! When both thresholds are equal the pool is mining solo and shares are
//! not tracked.

use serde::{Deserialize, Serialize};

/// Pool and network score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    pub pool: u32,
    pub net: u32,
}

/// Classification of one verified score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreClass {
    pub is_share: bool,
    pub is_solution: bool,
}

impl Difficulty {
    pub fn new(pool: u32, net: u32) -> Self {
        Self { pool, net }
    }

    /// Pool and network thresholds coincide.
    pub fn is_solo(&self) -> bool {
        self.pool == self.net
    }

    /// Classify `score`; invalid scores are neither share nor solution.
    pub fn classify(&self, score: u32, is_valid: bool) -> ScoreClass {
        if !is_valid {
            return ScoreClass::default();
        }
        ScoreClass {
            is_share: !self.is_solo() && score >= self.pool,
            is_solution: score >= self.net,
        }
    }
}
