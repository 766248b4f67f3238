//! # Concurrent Submissions
//!
//! Many in-flight transactions share one commit event hub. Each must get
//! exactly its own event, whatever order the events arrive in.

#[cfg(test)]
mod tests {
    use crate::fixtures::{CommitScript, ScriptedNetwork, ScriptedPeer};
    use dc_01_transaction_submission::{EcdsaSigner, SubmissionConfig, TransactionCoordinator};
    use dc_02_ledger_sim::{DevNetwork, DevNetworkConfig};
    use futures::future::join_all;
    use shared_types::{CommitOutcome, Creator, ValidationCode};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    const IN_FLIGHT: usize = 64;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shuffled_events_never_cross_deliver() {
        let net = ScriptedNetwork::new(
            vec![ScriptedPeer::endorsing("peer0", b"ok")],
            CommitScript::Jittered(ValidationCode::Valid, Duration::from_millis(50)),
            SubmissionConfig::default().with_commit_timeout(Duration::from_secs(10)),
        );

        let requests: Vec<_> = (0..IN_FLIGHT)
            .map(|i| {
                net.coordinator
                    .session()
                    .new_request("addContract", vec![i.to_string(), "{}".into()])
            })
            .collect();
        let expected: Vec<_> = requests.iter().map(|r| r.tx_id().clone()).collect();

        let results = join_all(requests.into_iter().map(|r| net.coordinator.submit(r))).await;

        for (result, tx_id) in results.into_iter().zip(&expected) {
            let receipt = result.unwrap();
            assert_eq!(&receipt.tx_id, tx_id);
            assert_eq!(receipt.outcome, CommitOutcome::Valid);
        }

        let unique: HashSet<_> = expected.iter().collect();
        assert_eq!(unique.len(), IN_FLIGHT);

        let stats = net.hub.stats();
        assert_eq!(stats.total_registered, IN_FLIGHT as u64);
        assert_eq!(stats.total_delivered, IN_FLIGHT as u64);
        assert_eq!(stats.total_unregistered, IN_FLIGHT as u64);
        assert_eq!(stats.total_unmatched, 0);
        assert_eq!(net.hub.listener_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_distinct_keys_all_commit_on_dev_network() {
        let network = DevNetwork::new(DevNetworkConfig {
            block_delay: Duration::from_millis(2),
            ..Default::default()
        });
        let session = network
            .session(
                "BLOperator",
                Creator::new("BlMSP", b"cert".to_vec()),
                Arc::new(EcdsaSigner::generate()),
            )
            .unwrap();
        let coordinator = TransactionCoordinator::new(
            Arc::new(session),
            SubmissionConfig::default().with_commit_timeout(Duration::from_secs(10)),
        );

        let submissions = (0..32).map(|i| {
            let request = coordinator
                .session()
                .new_request("addContract", vec![format!("k{i}"), format!("{{\"n\":{i}}}")]);
            coordinator.submit(request)
        });
        let results = join_all(submissions).await;

        assert!(results.iter().all(Result::is_ok));
        let mut blocks: Vec<u64> = results
            .into_iter()
            .map(|r| r.map(|receipt| receipt.block_number).unwrap_or_default())
            .collect();
        blocks.sort_unstable();
        blocks.dedup();
        assert_eq!(blocks.len(), 32, "one block per transaction");

        assert_eq!(network.state().height(), 32);
        assert_eq!(network.state().get("k7").unwrap().value, br#"{"n":7}"#);
        assert_eq!(coordinator.stats().committed, 32);
    }
}
