//! Configuration for the node client

use crate::domain::retry::RetryPolicy;
use qp_02_solution_crypto::KeystreamConfig;
use qp_03_payments::SendToManyConfig;
use serde::Deserialize;
use std::time::Duration;

/// Default node port.
pub const DEFAULT_NODE_PORT: u16 = 21841;

/// Node connection and request settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct NodeClientConfig {
    /// Node address (default: 127.0.0.1)
    pub host: String,

    /// Node port (default: 21841)
    pub port: u16,

    /// Connect timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,

    /// Per-read timeout in milliseconds (default: 2000)
    pub read_timeout_ms: u64,

    /// Per-write timeout in milliseconds (default: 2000)
    pub write_timeout_ms: u64,

    /// Partial reads allowed while completing a frame (default: 5)
    pub receive_attempts: u32,

    /// Solution send retries
    pub send_retry: RetryPolicy,

    /// Keystream rejection-sampling cap (default: 4096)
    pub keystream_max_attempts: u32,

    /// Ticks between the current tick and a payment's scheduled tick (default: 10)
    pub tick_lead: u32,
}

impl Default for NodeClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_NODE_PORT,
            connect_timeout_ms: 5_000,
            read_timeout_ms: 2_000,
            write_timeout_ms: 2_000,
            receive_attempts: 5,
            send_retry: RetryPolicy::default(),
            keystream_max_attempts: KeystreamConfig::default().max_attempts,
            tick_lead: SendToManyConfig::default().tick_lead,
        }
    }
}

impl NodeClientConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn keystream(&self) -> KeystreamConfig {
        KeystreamConfig {
            max_attempts: self.keystream_max_attempts,
        }
    }

    pub fn send_to_many(&self) -> SendToManyConfig {
        SendToManyConfig {
            tick_lead: self.tick_lead,
            ..SendToManyConfig::default()
        }
    }
}
