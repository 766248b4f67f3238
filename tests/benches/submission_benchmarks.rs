//! # Submission Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | signing | P-256 proposal signature and endorsement verification |
//! | commit-hub | listener registration and delivery through the hub |
//! | submit | full proposal → endorsement → ordering → commit on the dev network |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dc_01_transaction_submission::{
    verify_signature, EcdsaSigner, ProposalSigner, SubmissionConfig, TransactionCoordinator,
};
use dc_02_ledger_sim::{DevNetwork, DevNetworkConfig};
use futures::future::join_all;
use shared_bus::{CommitEvent, CommitEventHub, EventPublisher};
use shared_types::{Creator, PeerEndpoint, TransactionId, ValidationCode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing");
    let signer = EcdsaSigner::generate();
    let key = signer.verifying_key();
    let message = vec![0x42u8; 512];
    let signature = signer.sign(&message).unwrap();

    group.bench_function("sign_proposal", |b| {
        b.iter(|| black_box(signer.sign(black_box(&message)).unwrap()))
    });
    group.bench_function("verify_endorsement", |b| {
        b.iter(|| black_box(verify_signature(&key, &message, &signature)))
    });
    group.finish();
}

fn bench_commit_hub(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit-hub");
    let rt = tokio::runtime::Runtime::new().unwrap();
    let hub = CommitEventHub::new();
    let peer = PeerEndpoint::new("peer0", "grpc://localhost:7053");
    let counter = AtomicU64::new(0);

    group.bench_function("register_publish_receive", |b| {
        b.to_async(&rt).iter(|| async {
            let id = TransactionId::from_string(format!(
                "tx-{}",
                counter.fetch_add(1, Ordering::Relaxed)
            ));
            let mut listener = hub.register(&id).unwrap();
            hub.publish(CommitEvent::new(
                id,
                ValidationCode::Valid,
                1,
                peer.clone(),
            ));
            black_box(listener.recv().await)
        })
    });
    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit");
    group.measurement_time(Duration::from_secs(10));
    let rt = tokio::runtime::Runtime::new().unwrap();

    let network = DevNetwork::new(DevNetworkConfig {
        block_delay: Duration::ZERO,
        ..Default::default()
    });
    let session = network
        .session(
            "BLOperator",
            Creator::new("BlMSP", b"cert".to_vec()),
            Arc::new(EcdsaSigner::generate()),
        )
        .unwrap();
    let coordinator = TransactionCoordinator::new(Arc::new(session), SubmissionConfig::default());
    let counter = AtomicU64::new(0);

    for batch in [1usize, 16, 64] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("add_contract", batch), &batch, |b, &batch| {
            b.to_async(&rt).iter(|| {
                let submissions = (0..batch).map(|_| {
                    let key = counter.fetch_add(1, Ordering::Relaxed).to_string();
                    let request = coordinator
                        .session()
                        .new_request("addContract", vec![key, "{}".to_string()]);
                    coordinator.submit(request)
                });
                async move {
                    let results = join_all(submissions).await;
                    black_box(results.iter().filter(|r| r.is_ok()).count())
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_signing, bench_commit_hub, bench_submit);
criterion_main!(benches);
