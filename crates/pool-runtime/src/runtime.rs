//! Runtime wiring: node query, verification pool lifecycle, result consumer.

use std::sync::Arc;

use anyhow::{Context, Result};
use pool_telemetry::log_event;
use qp_01_wire_protocol::SystemInfo;
use qp_04_verification_pool::{
    Difficulty, K12ScorerFactory, PendingSolution, PendingSolutionStore, ScoreClass,
    ScorerFactory, VerificationResult, VerificationWorkerPool,
};
use qp_05_node_client::{NodeClient, TcpTransport, Transport};
use shared_crypto::{public_key_to_identity, IdentityCase, MessageSigner, SeedKeyPair};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;

/// The pool core: configuration, signer and verification workers.
pub struct PoolRuntime {
    config: RuntimeConfig,
    pool: VerificationWorkerPool,
    signer: Option<Arc<SeedKeyPair>>,
}

impl PoolRuntime {
    /// Runtime using the development K12 scorer.
    pub fn new(config: RuntimeConfig) -> Self {
        let factory = Arc::new(K12ScorerFactory {
            max_score: config.scorer.max_score,
        });
        Self::with_factory(config, factory)
    }

    /// Runtime with a caller-supplied scorer.
    pub fn with_factory(config: RuntimeConfig, factory: Arc<dyn ScorerFactory>) -> Self {
        let pool = VerificationWorkerPool::with_config(factory, config.verification.clone());
        Self {
            config,
            pool,
            signer: None,
        }
    }

    /// Attach the pool's signing identity.
    pub fn with_signer(mut self, signer: SeedKeyPair) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn signer(&self) -> Option<&Arc<SeedKeyPair>> {
        self.signer.as_ref()
    }

    /// Upper-case identity of the attached signer.
    pub fn identity(&self) -> Option<String> {
        self.signer
            .as_ref()
            .map(|s| public_key_to_identity(&s.public_key(), IdentityCase::Upper))
    }

    pub fn store(&self) -> &Arc<PendingSolutionStore> {
        self.pool.store()
    }

    pub fn submit(&self, entry: PendingSolution) {
        self.pool.submit(entry);
    }

    pub fn is_running(&self) -> bool {
        self.pool.is_running()
    }

    /// Connect to the configured node and apply its system info.
    pub async fn sync_with_node(&mut self) -> Result<SystemInfo> {
        let address = self.config.node.address();
        let mut client = NodeClient::<TcpTransport>::connect(self.config.node.clone())
            .await
            .with_context(|| format!("Failed to connect to node at {address}"))?;
        self.sync_with(&mut client).await
    }

    /// Query `client` for system info and adopt its solution threshold.
    pub async fn sync_with<T: Transport>(&mut self, client: &mut NodeClient<T>) -> Result<SystemInfo> {
        let info = client
            .system_info()
            .await
            .context("System info query failed")?;

        if info.solution_threshold > 0 {
            self.pool
                .set_score_threshold(info.solution_threshold.unsigned_abs());
        }

        info!(
            tick = info.tick,
            epoch = info.epoch,
            solution_threshold = info.solution_threshold,
            entities = info.number_of_entities,
            "Node synchronized"
        );
        Ok(info)
    }

    /// Start the verification workers and return their result channel.
    pub fn start(&mut self) -> Result<mpsc::Receiver<VerificationResult>> {
        info!("===========================================");
        info!("  Qatum Pool Core v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        if let Some(identity) = self.identity() {
            info!(%identity, "Pool identity loaded");
        }

        let results = self
            .pool
            .start()
            .context("Failed to start verification pool")?;

        log_event!(
            info,
            "runtime",
            "Pool core running",
            threads = self.pool.worker_count(),
            pool_difficulty = self.config.difficulty.pool,
            net_difficulty = self.config.difficulty.net
        );
        Ok(results)
    }

    /// Stop every worker and wait for them to exit.
    ///
    /// Joining happens on the blocking pool so result consumers on the
    /// async runtime keep draining while workers finish.
    pub async fn shutdown(self) -> Result<()> {
        info!("Initiating graceful shutdown...");
        let mut pool = self.pool;
        tokio::task::spawn_blocking(move || pool.stop())
            .await
            .context("Verification pool shutdown panicked")?;
        info!("Shutdown complete");
        Ok(())
    }
}

/// Running counts of classified results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultTally {
    pub processed: u64,
    pub invalid: u64,
    pub shares: u64,
    pub solutions: u64,
}

impl ResultTally {
    pub fn record(&mut self, result: &VerificationResult, difficulty: &Difficulty) -> ScoreClass {
        let class = difficulty.classify(result.score, result.is_valid);
        self.processed += 1;
        if !result.is_valid {
            self.invalid += 1;
        }
        if class.is_share {
            self.shares += 1;
        }
        if class.is_solution {
            self.solutions += 1;
        }
        class
    }
}

/// Classify results until every worker has dropped its sender.
pub async fn consume_results(
    mut results: mpsc::Receiver<VerificationResult>,
    difficulty: Difficulty,
) -> ResultTally {
    let mut tally = ResultTally::default();

    while let Some(result) = results.recv().await {
        let class = tally.record(&result, &difficulty);
        if class.is_solution {
            info!(tag = %result.correlation_tag, score = result.score, "Solution found");
        } else if class.is_share {
            debug!(tag = %result.correlation_tag, score = result.score, "Share accepted");
        } else if !result.is_valid {
            warn!(tag = %result.correlation_tag, score = result.score, "Solution rejected");
        }
    }

    info!(
        processed = tally.processed,
        shares = tally.shares,
        solutions = tally.solutions,
        invalid = tally.invalid,
        "Result consumer finished"
    );
    tally
}
