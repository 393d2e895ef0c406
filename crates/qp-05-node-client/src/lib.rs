//! # Node Client Subsystem (QP-05)
//!
//! Request/response flows against one network node.
//!
//! ## Architecture
//!
//! ```text
//! NodeClient<T: Transport>
//!   ├── system_info / current_tick / mining_seed   (type 46 → 47)
//!   ├── send_to_many_fee                            (type 42 → 43)
//!   ├── send_to_many                                (fee → build → type 24)
//!   └── send_solution                               (type 1, retried)
//! ```
//!
//! The transport is owned by the client and supplied by the caller, so a
//! session's connection lives exactly as long as its `NodeClient`.
//!
//! - `ports/outbound.rs`: `Transport`
//! - `adapters/tcp.rs`: Tokio TCP transport with read/write timeouts
//! - `adapters/memory.rs`: scripted in-memory transport for tests
//! - `domain/retry.rs`: send retry policy

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::memory::MockTransport;
pub use adapters::tcp::TcpTransport;
pub use config::NodeClientConfig;
pub use domain::errors::{NodeClientError, Result};
pub use domain::retry::RetryPolicy;
pub use ports::outbound::Transport;
pub use service::NodeClient;
