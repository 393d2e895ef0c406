//! # Qatum Pool Core Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks
//! └── src/integration/  # Cross-crate scenarios
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qp-tests
//! cargo test -p qp-tests integration::payment_flow
//! cargo bench -p qp-tests
//! ```

pub mod integration;
