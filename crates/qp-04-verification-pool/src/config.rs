//! Configuration for the verification worker pool

use crate::domain::store::PopOrder;
use serde::Deserialize;
use std::time::Duration;

/// Worker pool settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct VerificationPoolConfig {
    /// Worker threads (default: number of CPUs)
    pub threads: usize,

    /// Sleep between empty-store checks, in milliseconds (default: 100)
    pub poll_interval_ms: u64,

    /// Buffered results before workers block (default: 1024)
    pub result_channel_capacity: usize,

    /// Threshold passed to `is_good_score` (default: 0)
    pub score_threshold: u32,

    /// Pop discipline of the pending store (default: lifo)
    pub pop_order: PopOrder,
}

impl Default for VerificationPoolConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            poll_interval_ms: 100,
            result_channel_capacity: 1024,
            score_threshold: 0,
            pop_order: PopOrder::Lifo,
        }
    }
}

impl VerificationPoolConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
