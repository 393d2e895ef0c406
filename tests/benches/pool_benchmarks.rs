//! # Qatum Pool Core Benchmarks
//!
//! | Group | Path measured |
//! |-------|---------------|
//! | qp-01 Wire Protocol | header encode/decode, system info scan |
//! | qp-02 Solution Crypto | nonce rejection sampling, full packet build |
//! | qp-03 Payments | 25-recipient SendToManyV1 build |
//! | qp-04 Verification Pool | store push/pop under contention |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qp_01_wire_protocol::{parse_system_info, RequestResponseHeader, SystemInfo, HEADER_SIZE, SYSTEM_INFO_SIZE};
use qp_02_solution_crypto::{KeystreamDeriver, SolutionPacketBuilder};
use qp_03_payments::{SendToManyConfig, TransactionPacketBuilder, MAX_RECIPIENTS};
use qp_04_verification_pool::{PendingSolution, PendingSolutionStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared_crypto::{public_key_to_identity, IdentityCase, MessageSigner, SeedKeyPair};
use std::sync::Arc;
use std::time::Duration;

const SEED: &str = "caaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaac";

// ============================================================================
// QP-01: Wire Protocol
// ============================================================================

fn bench_header_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("qp-01-wire-protocol");

    let header = RequestResponseHeader::new(1152, 24, 0x1234_5678).unwrap();
    group.bench_function("header_encode", |b| b.iter(|| black_box(header.encode())));

    let bytes = header.encode();
    group.bench_function("header_decode", |b| {
        b.iter(|| black_box(RequestResponseHeader::decode(&bytes).unwrap()))
    });

    // Scan past N unrelated frames to the system info response
    for skipped in [1usize, 16, 256] {
        let mut stream = Vec::new();
        for _ in 0..skipped {
            stream.extend(RequestResponseHeader::new(HEADER_SIZE + 32, 1, 0).unwrap().encode());
            stream.extend([0u8; 32]);
        }
        stream.extend(
            RequestResponseHeader::new(HEADER_SIZE + SYSTEM_INFO_SIZE, 47, 1)
                .unwrap()
                .encode(),
        );
        stream.extend(SystemInfo::default().encode());

        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("system_info_scan", skipped),
            &stream,
            |b, stream| b.iter(|| black_box(parse_system_info(stream).unwrap())),
        );
    }

    group.finish();
}

// ============================================================================
// QP-02: Solution Crypto
// ============================================================================

fn bench_solution_packet(c: &mut Criterion) {
    let mut group = c.benchmark_group("qp-02-solution-crypto");
    group.measurement_time(Duration::from_secs(10));

    let signer = SeedKeyPair::from_seed(SEED).unwrap();
    let deriver = KeystreamDeriver::default();
    let mut rng = StdRng::seed_from_u64(1);

    group.bench_function("derive_nonce_and_keystream", |b| {
        b.iter(|| {
            black_box(
                deriver
                    .derive_nonce_and_keystream_with(&[7u8; 32], &mut rng)
                    .unwrap(),
            )
        })
    });

    let builder = SolutionPacketBuilder::new(&signer, deriver);
    let destination = [9u8; 32];
    group.bench_function("build_solution_packet", |b| {
        b.iter(|| {
            black_box(
                builder
                    .build_with(&destination, &[1u8; 32], &[2u8; 32], &mut rng)
                    .unwrap(),
            )
        })
    });

    group.finish();
}

// ============================================================================
// QP-03: Payments
// ============================================================================

fn bench_send_to_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("qp-03-payments");

    let signer = SeedKeyPair::from_seed(SEED).unwrap();
    let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
    let csv: String = (0..MAX_RECIPIENTS)
        .map(|i| {
            let key = SeedKeyPair::generate().public_key();
            format!("{},{}\n", public_key_to_identity(&key, IdentityCase::Upper), i + 1)
        })
        .collect();

    group.throughput(Throughput::Elements(MAX_RECIPIENTS as u64));
    group.bench_function("build_from_csv_25", |b| {
        b.iter(|| black_box(builder.build_from_csv(&csv, 10, 1_000).unwrap()))
    });

    group.finish();
}

// ============================================================================
// QP-04: Verification Pool
// ============================================================================

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("qp-04-verification-pool");

    group.bench_function("push_pop_single_thread", |b| {
        let store = PendingSolutionStore::new();
        b.iter(|| {
            store.push(PendingSolution::with_tag("", "", "", "t"));
            black_box(store.pop_most_recent().unwrap())
        })
    });

    for threads in [2usize, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("contended_push_pop", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let store = Arc::new(PendingSolutionStore::new());
                    let handles: Vec<_> = (0..threads)
                        .map(|_| {
                            let store = Arc::clone(&store);
                            std::thread::spawn(move || {
                                for _ in 0..256 {
                                    store.push(PendingSolution::with_tag("", "", "", "t"));
                                    let _ = store.pop();
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    black_box(store.size())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_header_codec,
    bench_solution_packet,
    bench_send_to_many,
    bench_store
);
criterion_main!(benches);
