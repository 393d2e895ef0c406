//! # Verification Pool Subsystem (QP-04)
//!
//! Scores candidate solutions before they are broadcast.
//!
//! ## Pipeline
//!
//! ```text
//! producers ──push──▶ PendingSolutionStore ◀──pop── qp-verify-0..N
//!                      (single mutex)                 │ own scorer each
//!                                                     ▼
//!                                   mpsc::Receiver<VerificationResult>
//! ```
//!
//! - The store is the only shared mutable state; critical sections are a
//!   single push or pop.
//! - Each worker owns its scoring function for its whole life and drops it
//!   on exit.
//! - The stop flag is checked between items, so shutdown waits for at most
//!   one evaluation plus one poll interval.
//! - A pool refuses to start while its previous workers are alive.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::k12_scorer::{K12Scorer, K12ScorerFactory};
pub use config::VerificationPoolConfig;
pub use domain::difficulty::{Difficulty, ScoreClass};
pub use domain::entities::{PendingSolution, VerificationResult};
pub use domain::errors::{Result, VerificationError};
pub use domain::store::{PendingSolutionStore, PopOrder};
pub use ports::outbound::{ScorerFactory, ScoringFunction};
pub use service::VerificationWorkerPool;
