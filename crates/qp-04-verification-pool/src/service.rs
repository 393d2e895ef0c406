//! # Verification Worker Pool
//!
//! N named OS threads draining one [`PendingSolutionStore`]. Each worker
//! creates its own scorer through the [`ScorerFactory`], reports every
//! scored entry on a bounded channel and drops the scorer when it exits.
//! `start` returns only after every worker has its scorer.

use crate::config::VerificationPoolConfig;
use crate::domain::entities::{PendingSolution, VerificationResult};
use crate::domain::errors::{Result, VerificationError};
use crate::domain::store::PendingSolutionStore;
use crate::ports::outbound::{ScorerFactory, ScoringFunction};
use shared_types::Hash;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{mpsc as std_mpsc, Arc};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, warn};

/// Back-off while the result channel is full.
const SEND_RETRY_INTERVAL: Duration = Duration::from_millis(5);

/// Pool of verification worker threads.
pub struct VerificationWorkerPool {
    store: Arc<PendingSolutionStore>,
    factory: Arc<dyn ScorerFactory>,
    config: VerificationPoolConfig,
    threshold: Arc<AtomicU32>,
    stop: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl VerificationWorkerPool {
    /// Pool over a caller-owned store.
    pub fn new(
        store: Arc<PendingSolutionStore>,
        factory: Arc<dyn ScorerFactory>,
        config: VerificationPoolConfig,
    ) -> Self {
        let threshold = Arc::new(AtomicU32::new(config.score_threshold));
        Self {
            store,
            factory,
            config,
            threshold,
            stop: Arc::new(AtomicBool::new(false)),
            workers: Vec::new(),
        }
    }

    /// Pool with a fresh store using the configured pop order.
    pub fn with_config(factory: Arc<dyn ScorerFactory>, config: VerificationPoolConfig) -> Self {
        let store = Arc::new(PendingSolutionStore::with_order(config.pop_order));
        Self::new(store, factory, config)
    }

    pub fn store(&self) -> &Arc<PendingSolutionStore> {
        &self.store
    }

    pub fn config(&self) -> &VerificationPoolConfig {
        &self.config
    }

    /// Queue a solution for scoring.
    pub fn submit(&self, entry: PendingSolution) {
        self.store.push(entry);
    }

    /// Threshold for `is_good_score`; applies from the next scored entry.
    pub fn set_score_threshold(&self, threshold: u32) {
        self.threshold.store(threshold, Ordering::Relaxed);
    }

    pub fn score_threshold(&self) -> u32 {
        self.threshold.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        !self.workers.is_empty()
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Spawn the workers and return the result receiver.
    ///
    /// # Errors
    ///
    /// `AlreadyRunning` while workers from a previous start are alive,
    /// `NoWorkers` for a zero thread count, `Spawn` when the OS refuses a
    /// thread and `ScorerInit` when any worker fails to create its scorer.
    /// On error every worker spawned so far is stopped again.
    pub fn start(&mut self) -> Result<mpsc::Receiver<VerificationResult>> {
        if self.is_running() {
            return Err(VerificationError::AlreadyRunning {
                workers: self.workers.len(),
            });
        }
        if self.config.threads == 0 {
            return Err(VerificationError::NoWorkers);
        }

        self.stop.store(false, Ordering::Release);
        let (tx, rx) = mpsc::channel(self.config.result_channel_capacity.max(1));
        let (ready_tx, ready_rx) = std_mpsc::channel();

        for id in 0..self.config.threads {
            let worker = Worker {
                id,
                store: Arc::clone(&self.store),
                stop: Arc::clone(&self.stop),
                threshold: Arc::clone(&self.threshold),
                poll_interval: self.config.poll_interval(),
                results: tx.clone(),
            };
            let factory = Arc::clone(&self.factory);
            let ready = ready_tx.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("qp-verify-{id}"))
                .spawn(move || worker.run(factory.as_ref(), ready));
            match spawned {
                Ok(handle) => self.workers.push(handle),
                Err(e) => {
                    error!(worker = id, error = %e, "[qp-04] Failed to spawn worker");
                    self.stop();
                    return Err(VerificationError::Spawn(e.to_string()));
                }
            }
        }
        drop(ready_tx);

        for _ in 0..self.workers.len() {
            let ready = ready_rx.recv().unwrap_or_else(|_| {
                Err(VerificationError::ScorerInit(
                    "worker exited before reporting".into(),
                ))
            });
            if let Err(e) = ready {
                self.stop();
                return Err(e);
            }
        }

        info!(
            threads = self.workers.len(),
            poll_ms = self.config.poll_interval_ms,
            "[qp-04] Verification pool started"
        );
        Ok(rx)
    }

    /// Signal all workers and wait until every one has exited.
    pub fn stop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.stop.store(true, Ordering::Release);
        let count = self.workers.len();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("[qp-04] Verification worker panicked");
            }
        }
        info!(threads = count, "[qp-04] Verification pool stopped");
    }
}

impl Drop for VerificationWorkerPool {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker {
    id: usize,
    store: Arc<PendingSolutionStore>,
    stop: Arc<AtomicBool>,
    threshold: Arc<AtomicU32>,
    poll_interval: Duration,
    results: mpsc::Sender<VerificationResult>,
}

impl Worker {
    fn run(self, factory: &dyn ScorerFactory, ready: std_mpsc::Sender<Result<()>>) {
        let mut scorer = match factory.create() {
            Ok(scorer) => scorer,
            Err(e) => {
                error!(worker = self.id, error = %e, "[qp-04] Scorer initialization failed");
                let _ = ready.send(Err(e));
                return;
            }
        };
        let _ = ready.send(Ok(()));
        drop(ready);
        debug!(worker = self.id, "[qp-04] Worker ready");

        let mut loaded_seed: Option<Hash> = None;
        'outer: while !self.stopping() {
            while let Some(entry) = self.store.pop() {
                let result = self.score(scorer.as_mut(), &mut loaded_seed, &entry);
                if !self.deliver(result) || self.stopping() {
                    break 'outer;
                }
            }
            std::thread::sleep(self.poll_interval);
        }

        drop(scorer);
        debug!(worker = self.id, "[qp-04] Worker exited, scorer released");
    }

    fn stopping(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Hand a result to the consumer. Returns `false` when the worker
    /// should exit: receiver gone, or stop requested while the channel
    /// stays full (the result is dropped).
    fn deliver(&self, mut result: VerificationResult) -> bool {
        loop {
            match self.results.try_send(result) {
                Ok(()) => return true,
                Err(TrySendError::Closed(_)) => {
                    warn!(worker = self.id, "[qp-04] Result receiver dropped, worker exiting");
                    return false;
                }
                Err(TrySendError::Full(pending)) => {
                    if self.stopping() {
                        debug!(
                            worker = self.id,
                            tag = %pending.correlation_tag,
                            "[qp-04] Result channel full at shutdown, result dropped"
                        );
                        return false;
                    }
                    result = pending;
                    std::thread::sleep(SEND_RETRY_INTERVAL);
                }
            }
        }
    }

    fn score(
        &self,
        scorer: &mut dyn ScoringFunction,
        loaded_seed: &mut Option<Hash>,
        entry: &PendingSolution,
    ) -> VerificationResult {
        let decoded = entry.decode_mining_seed().and_then(|seed| {
            let nonce = entry.decode_nonce()?;
            let public_key = entry.decode_public_key()?;
            Ok((seed, nonce, public_key))
        });
        let (seed, nonce, public_key) = match decoded {
            Ok(fields) => fields,
            Err(e) => {
                warn!(
                    worker = self.id,
                    tag = %entry.correlation_tag,
                    error = %e,
                    "[qp-04] Undecodable solution reported invalid"
                );
                return VerificationResult {
                    correlation_tag: entry.correlation_tag.clone(),
                    score: 0,
                    is_valid: false,
                };
            }
        };

        if loaded_seed.as_ref() != Some(&seed) {
            scorer.seed(&seed);
            *loaded_seed = Some(seed);
        }
        let score = scorer.evaluate(&public_key, &seed, &nonce);
        let threshold = self.threshold.load(Ordering::Relaxed);
        let is_valid = scorer.is_valid_score(score) && scorer.is_good_score(score, threshold);

        debug!(
            worker = self.id,
            tag = %entry.correlation_tag,
            score,
            is_valid,
            "[qp-04] Solution scored"
        );
        VerificationResult {
            correlation_tag: entry.correlation_tag.clone(),
            score,
            is_valid,
        }
    }
}
