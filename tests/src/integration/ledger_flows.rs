//! # Ledger Flows
//!
//! Submission service against the development network running the
//! digital-contracts chaincode: endorsement, ordering, MVCC validation and
//! commit events all happen in-process.

#[cfg(test)]
mod tests {
    use dc_01_transaction_submission::{
        EcdsaSigner, EndorsementPolicy, QueryError, QueryRunner, SubmissionConfig,
        SubmissionError, SubmissionService, TransactionSubmissionApi,
    };
    use dc_02_ledger_sim::{Contract, DevNetwork, DevNetworkConfig, GENESIS_KEY};
    use shared_types::{Creator, PeerEndpoint};
    use std::sync::Arc;
    use std::time::Duration;

    struct Fixture {
        network: DevNetwork,
        service: SubmissionService,
    }

    fn fixture(peers: usize, policy: EndorsementPolicy) -> Fixture {
        let network = DevNetwork::new(DevNetworkConfig {
            peers: (0..peers)
                .map(|i| {
                    PeerEndpoint::new(
                        format!("peer{i}.berger-levrault.com"),
                        format!("grpc://localhost:{}", 7051 + i * 1000),
                    )
                })
                .collect(),
            block_delay: Duration::from_millis(5),
            ..Default::default()
        });
        let session = network
            .session(
                "BLOperator",
                Creator::new("BlMSP", b"cert".to_vec()),
                Arc::new(EcdsaSigner::generate()),
            )
            .unwrap();
        let service = SubmissionService::new(
            Arc::new(session),
            SubmissionConfig::default()
                .with_commit_timeout(Duration::from_secs(5))
                .with_policy(policy),
        )
        .unwrap();
        Fixture { network, service }
    }

    #[tokio::test]
    async fn test_init_ledger_then_read_genesis() {
        let fx = fixture(1, EndorsementPolicy::FirstResponse);

        let receipt = fx.service.invoke("initLedger", vec![]).await.unwrap();
        assert_eq!(receipt.block_number, 1);
        let stored: Contract = serde_json::from_slice(&receipt.payload).unwrap();
        assert_eq!(stored.signatures.len(), 2);
        assert_eq!(
            stored.signatures[0].signatory_ref.business_name,
            "Ville de Montpellier"
        );
        assert_eq!(stored.signatures[0].signature_digest.len(), 64);

        let result = fx
            .service
            .query("getContract", vec![GENESIS_KEY.into()])
            .await
            .unwrap();
        assert_eq!(result.payload, receipt.payload);
        assert_eq!(fx.network.state().get(GENESIS_KEY).unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_second_init_is_rejected() {
        let fx = fixture(1, EndorsementPolicy::FirstResponse);
        fx.service.invoke("initLedger", vec![]).await.unwrap();

        let err = fx.service.invoke("initLedger", vec![]).await.unwrap_err();
        assert_eq!(
            err,
            SubmissionError::ProposalRejected {
                message: "Ledger already initialized".into()
            }
        );
        assert_eq!(fx.network.orderer().broadcasts(), 1);
        assert_eq!(fx.network.state().height(), 1);
    }

    #[tokio::test]
    async fn test_query_does_not_write() {
        let fx = fixture(1, EndorsementPolicy::FirstResponse);
        let runner = QueryRunner::new(fx.service.session().clone(), Duration::from_secs(5));

        let result = runner.query("initLedger", vec![]).await.unwrap();
        assert_eq!(result.reply_count(), 1);
        assert!(result.payload_text().contains("Berger-Levrault"));

        assert!(fx.network.state().is_empty());
        assert_eq!(fx.network.orderer().broadcasts(), 0);
        assert_eq!(fx.network.hub().stats().total_registered, 0);
    }

    #[tokio::test]
    async fn test_chaincode_argument_errors() {
        let fx = fixture(1, EndorsementPolicy::FirstResponse);

        let err = fx
            .service
            .invoke("addContract", vec!["only-key".into()])
            .await
            .unwrap_err();
        assert_eq!(
            err.client_message(),
            "Wrong number of arguments. Expecting 2 arguments (key and value)"
        );

        let err = fx.service.query("getContract", vec![]).await.unwrap_err();
        assert_eq!(
            err,
            QueryError::Chaincode {
                status: 500,
                message: "Wrong number of arguments. Given 0 expected 1 (a key)".into()
            }
        );

        let err = fx
            .service
            .invoke("deleteContract", vec!["1".into()])
            .await
            .unwrap_err();
        assert_eq!(
            err.client_message(),
            "Trying to invoke unknown function deleteContract"
        );
        assert_eq!(fx.service.stats().rejected, 2);
    }

    #[tokio::test]
    async fn test_all_must_agree_across_three_peers() {
        let fx = fixture(3, EndorsementPolicy::AllMustAgree);

        let receipt = fx
            .service
            .invoke("addContract", vec!["9".into(), "{\"amount\":120.5}".into()])
            .await
            .unwrap();
        assert_eq!(receipt.payload_text(), "{\"amount\":120.5}");
        assert!(fx.network.peers().iter().all(|p| p.proposals() == 1));
        assert_eq!(receipt.committed_by.name, "peer0.berger-levrault.com");
    }

    #[tokio::test]
    async fn test_offline_peer_under_each_policy() {
        let fx = fixture(2, EndorsementPolicy::FirstResponse);
        fx.network.peers()[1].set_online(false);
        assert!(fx
            .service
            .invoke("addContract", vec!["a".into(), "1".into()])
            .await
            .is_ok());

        let fx = fixture(2, EndorsementPolicy::AllMustAgree);
        fx.network.peers()[1].set_online(false);
        let err = fx
            .service
            .invoke("addContract", vec!["a".into(), "1".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::ProposalRejected { .. }));
        assert_eq!(fx.network.orderer().broadcasts(), 0);

        let fx = fixture(2, EndorsementPolicy::FirstResponse);
        fx.network.peers()[0].set_online(false);
        let err = fx
            .service
            .invoke("addContract", vec!["a".into(), "1".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::ProposalRejected { .. }));
    }
}
