//! # Verification Flow
//!
//! Pending solutions pushed into the store are scored by worker threads
//! and delivered over the result channel, then classified against the
//! pool and network difficulty.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::random_identity;

    use qp_04_verification_pool::{
        Difficulty, PendingSolution, PendingSolutionStore, ScorerFactory, ScoringFunction,
        VerificationError, VerificationPoolConfig, VerificationResult, VerificationWorkerPool,
    };
    use shared_types::{Hash, PublicKey};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Scores a solution by the first byte of its nonce.
    struct NonceByteScorer {
        evaluations: Arc<AtomicUsize>,
    }

    impl ScoringFunction for NonceByteScorer {
        fn seed(&mut self, _mining_seed: &Hash) {}

        fn evaluate(&mut self, _public_key: &PublicKey, _mining_seed: &Hash, nonce: &Hash) -> u32 {
            self.evaluations.fetch_add(1, Ordering::SeqCst);
            nonce[0] as u32
        }

        fn is_valid_score(&self, score: u32) -> bool {
            score > 0
        }

        fn is_good_score(&self, score: u32, threshold: u32) -> bool {
            score >= threshold
        }
    }

    #[derive(Default)]
    struct NonceByteFactory {
        created: AtomicUsize,
        evaluations: Arc<AtomicUsize>,
    }

    impl ScorerFactory for NonceByteFactory {
        fn create(&self) -> qp_04_verification_pool::Result<Box<dyn ScoringFunction>> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(NonceByteScorer {
                evaluations: Arc::clone(&self.evaluations),
            }))
        }
    }

    fn config(threads: usize) -> VerificationPoolConfig {
        VerificationPoolConfig {
            threads,
            poll_interval_ms: 10,
            ..VerificationPoolConfig::default()
        }
    }

    fn entry(nonce_byte: u8, identity: &str, tag: &str) -> PendingSolution {
        PendingSolution::with_tag(
            "5a".repeat(32),
            format!("{nonce_byte:02x}").repeat(32),
            identity,
            tag,
        )
    }

    async fn next(results: &mut mpsc::Receiver<VerificationResult>) -> VerificationResult {
        timeout(Duration::from_secs(5), results.recv())
            .await
            .expect("result within timeout")
            .expect("channel open")
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[tokio::test]
    async fn test_idle_pool_emits_no_results() {
        let factory = Arc::new(NonceByteFactory::default());
        let mut pool = VerificationWorkerPool::with_config(factory.clone(), config(2));
        let mut results = pool.start().unwrap();

        // Several poll intervals with nothing pending
        let idle = timeout(Duration::from_millis(80), results.recv()).await;
        assert!(idle.is_err());
        assert_eq!(factory.evaluations.load(Ordering::SeqCst), 0);
        assert!(pool.is_running());

        pool.stop();
        assert!(!pool.is_running());
        assert!(results.recv().await.is_none());
        assert_eq!(factory.created.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_worker_processes_newest_first() {
        let identity = random_identity();
        let factory = Arc::new(NonceByteFactory::default());
        let mut pool = VerificationWorkerPool::with_config(factory, config(1));

        pool.submit(entry(1, &identity, "e1"));
        pool.submit(entry(2, &identity, "e2"));
        pool.submit(entry(3, &identity, "e3"));

        let mut results = pool.start().unwrap();
        let order: Vec<String> = vec![
            next(&mut results).await.correlation_tag,
            next(&mut results).await.correlation_tag,
            next(&mut results).await.correlation_tag,
        ];
        assert_eq!(order, ["e3", "e2", "e1"]);
        assert!(!pool.store().has_pending());
        pool.stop();
    }

    #[tokio::test]
    async fn test_results_classified_against_difficulty() {
        let identity = random_identity();
        let factory = Arc::new(NonceByteFactory::default());
        let store = Arc::new(PendingSolutionStore::new());
        let mut pool = VerificationWorkerPool::new(store.clone(), factory, config(3));
        let mut results = pool.start().unwrap();

        store.push(entry(0, &identity, "zero"));
        store.push(entry(20, &identity, "low"));
        store.push(entry(60, &identity, "share"));
        store.push(entry(120, &identity, "solution"));
        store.push(PendingSolution::with_tag("zz", "00", &identity, "garbage"));

        let difficulty = Difficulty::new(50, 100);
        let mut by_tag = std::collections::HashMap::new();
        for _ in 0..5 {
            let r = next(&mut results).await;
            by_tag.insert(r.correlation_tag.clone(), r);
        }
        pool.stop();

        let class = |tag: &str| {
            let r = &by_tag[tag];
            difficulty.classify(r.score, r.is_valid)
        };
        assert!(!by_tag["zero"].is_valid);
        assert!(!by_tag["garbage"].is_valid);
        assert_eq!(by_tag["garbage"].score, 0);

        assert!(by_tag["low"].is_valid);
        assert!(!class("low").is_share);
        assert!(class("share").is_share && !class("share").is_solution);
        assert!(class("solution").is_share && class("solution").is_solution);
    }

    #[tokio::test]
    async fn test_score_threshold_applies_to_running_workers() {
        let identity = random_identity();
        let factory = Arc::new(NonceByteFactory::default());
        let mut pool = VerificationWorkerPool::with_config(factory, config(1));
        let mut results = pool.start().unwrap();

        pool.submit(entry(30, &identity, "before"));
        assert!(next(&mut results).await.is_valid);

        pool.set_score_threshold(40);
        pool.submit(entry(30, &identity, "after"));
        let r = next(&mut results).await;
        assert_eq!(r.score, 30);
        assert!(!r.is_valid);
        pool.stop();
    }

    #[tokio::test]
    async fn test_restart_after_stop() {
        let factory = Arc::new(NonceByteFactory::default());
        let mut pool = VerificationWorkerPool::with_config(factory, config(1));

        let _first = pool.start().unwrap();
        assert!(matches!(
            pool.start(),
            Err(VerificationError::AlreadyRunning { workers: 1 })
        ));
        pool.stop();

        let mut second = pool.start().unwrap();
        pool.submit(entry(9, &random_identity(), "again"));
        assert_eq!(next(&mut second).await.correlation_tag, "again");
        pool.stop();
    }
}
