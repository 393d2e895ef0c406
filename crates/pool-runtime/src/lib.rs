//! # Pool Runtime Library
//!
//! Exposes the runtime wiring for testing. The entry point is the
//! `pool-runtime` binary in `main.rs`.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry from the environment
//! 2. Load configuration (TOML file, then environment overrides)
//! 3. Query the node for the current tick and solution threshold
//! 4. Start the verification workers
//! 5. Classify results until Ctrl+C, then stop and join every worker

pub mod config;
pub mod runtime;

pub use config::{ConfigError, RuntimeConfig, ScorerConfig};
pub use runtime::{consume_results, PoolRuntime, ResultTally};
