//! # Qatum Pool Core Runtime
//!
//! Entry point for the pool core.
//!
//! ```text
//! pool-runtime [config.toml]
//! ```
//!
//! The config path may also be given through `QP_CONFIG`. The secret seed
//! is read from `QP_SECRET_SEED` only.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pool_runtime::config::secret_seed_from_env;
use pool_runtime::{consume_results, PoolRuntime, RuntimeConfig};
use pool_telemetry::{init_telemetry, TelemetryConfig};
use shared_crypto::SeedKeyPair;
use tracing::{info, warn};

fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("QP_CONFIG").ok())
        .map(PathBuf::from)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _telemetry = init_telemetry(&TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    // Load configuration
    let config =
        RuntimeConfig::load(config_path().as_deref()).context("Failed to load configuration")?;

    let mut runtime = PoolRuntime::new(config);
    match secret_seed_from_env() {
        Some(seed) => {
            let signer = SeedKeyPair::from_seed(&seed).context("Invalid QP_SECRET_SEED")?;
            runtime = runtime.with_signer(signer);
        }
        None => warn!("QP_SECRET_SEED not set; running without a pool identity"),
    }

    if !runtime.config().offline {
        if let Err(e) = runtime.sync_with_node().await {
            warn!(error = %format!("{e:#}"), "Continuing without node state");
        }
    }

    let results = runtime.start()?;
    let consumer = tokio::spawn(consume_results(results, runtime.difficulty()));

    info!("Pool core is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await?;
    let tally = consumer.await.context("Result consumer panicked")?;
    info!(
        processed = tally.processed,
        shares = tally.shares,
        solutions = tally.solutions,
        "Exiting"
    );

    Ok(())
}
