//! # Runtime Configuration
//!
//! One TOML document with a table per subsystem:
//!
//! ```toml
//! [node]
//! host = "127.0.0.1"
//! port = 21841
//!
//! [verification]
//! threads = 8
//! pop_order = "lifo"
//!
//! [difficulty]
//! pool = 40
//! net = 100
//! ```
//!
//! Environment overrides are applied after the file. The secret seed is
//! only ever read from `QP_SECRET_SEED`.

use std::path::{Path, PathBuf};

use qp_04_verification_pool::{Difficulty, VerificationPoolConfig};
use qp_05_node_client::NodeClientConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use zeroize::Zeroizing;

/// Environment variable holding the 55-letter secret seed.
pub const SECRET_SEED_VAR: &str = "QP_SECRET_SEED";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`RuntimeConfig`]
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Development scorer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Upper bound of produced scores (default: 1024)
    pub max_score: u32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self { max_score: 1024 }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Node connection.
    pub node: NodeClientConfig,
    /// Verification workers.
    pub verification: VerificationPoolConfig,
    /// Share and solution thresholds.
    pub difficulty: Difficulty,
    /// Development scorer.
    pub scorer: ScorerConfig,
    /// Skip the startup node query (default: false).
    pub offline: bool,
}

impl RuntimeConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path` when given, then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                info!(path = %path.display(), "Loaded configuration file");
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `QP_*` overrides from `lookup`. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("QP_NODE_HOST") {
            self.node.host = host;
        }
        if let Some(port) = parse_var(&lookup, "QP_NODE_PORT") {
            self.node.port = port;
        }
        if let Some(threads) = parse_var(&lookup, "QP_VERIFY_THREADS") {
            self.verification.threads = threads;
        }
        if let Some(pool) = parse_var(&lookup, "QP_POOL_DIFFICULTY") {
            self.difficulty.pool = pool;
        }
        if let Some(net) = parse_var(&lookup, "QP_NET_DIFFICULTY") {
            self.difficulty.net = net;
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = key, value = %raw, "Ignoring unparseable override");
            None
        }
    }
}

/// Read the secret seed from the environment.
pub fn secret_seed_from_env() -> Option<Zeroizing<String>> {
    std::env::var(SECRET_SEED_VAR)
        .ok()
        .map(|s| Zeroizing::new(s.trim().to_string()))
        .filter(|s| !s.is_empty())
}
