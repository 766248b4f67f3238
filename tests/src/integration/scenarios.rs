//! # Submission Scenarios
//!
//! The four canonical outcomes of one invocation, driven through the
//! coordinator, a real commit event hub and scripted peers/orderer:
//!
//! | Endorsements | Commit event        | Result                           |
//! |--------------|---------------------|----------------------------------|
//! | all 200      | `VALID`             | receipt, listener released       |
//! | all 500      | (never ordered)     | `ProposalRejected`, no listener  |
//! | all 200      | never arrives       | `CommitTimeout`, listener removed|
//! | all 200      | `INVALID`           | `CommitInvalid("INVALID")`       |

#[cfg(test)]
mod tests {
    use crate::fixtures::{CommitScript, ScriptedNetwork, ScriptedPeer};
    use dc_01_transaction_submission::{EndorsementPolicy, SubmissionConfig, SubmissionError};
    use shared_types::{CommitOutcome, ValidationCode};
    use std::time::Duration;

    fn config() -> SubmissionConfig {
        SubmissionConfig::default().with_commit_timeout(Duration::from_secs(30))
    }

    fn request(net: &ScriptedNetwork) -> shared_types::InvocationRequest {
        net.coordinator
            .session()
            .new_request("addContract", vec!["1".into(), "{}".into()])
    }

    #[tokio::test]
    async fn test_all_endorse_and_valid_event() {
        let net = ScriptedNetwork::new(
            vec![
                ScriptedPeer::endorsing("peer0", b"{}"),
                ScriptedPeer::endorsing("peer1", b"{}"),
            ],
            CommitScript::Report(ValidationCode::Valid, Duration::from_millis(10)),
            config(),
        );
        let request = request(&net);
        let tx_id = request.tx_id().clone();

        let receipt = net.coordinator.submit(request).await.unwrap();

        assert_eq!(receipt.tx_id, tx_id);
        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.outcome, CommitOutcome::Valid);
        assert_eq!(receipt.payload_text(), "{}");
        assert_eq!(net.orderer.broadcasts(), 1);

        let stats = net.hub.stats();
        assert_eq!(stats.total_registered, 1);
        assert_eq!(stats.total_delivered, 1);
        assert_eq!(stats.total_unregistered, 1);
        assert_eq!(net.hub.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_all_fail_is_rejected_without_ordering() {
        let net = ScriptedNetwork::new(
            vec![
                ScriptedPeer::new("peer0", 500, "Asset 1 already exists", b""),
                ScriptedPeer::new("peer1", 500, "Asset 1 already exists", b""),
            ],
            CommitScript::Report(ValidationCode::Valid, Duration::ZERO),
            config(),
        );

        let err = net.coordinator.submit(request(&net)).await.unwrap_err();

        assert_eq!(
            err,
            SubmissionError::ProposalRejected {
                message: "Asset 1 already exists".into()
            }
        );
        assert_eq!(net.proposals(), 2);
        assert_eq!(net.orderer.broadcasts(), 0);
        assert_eq!(net.hub.stats().total_registered, 0);
        assert_eq!(net.coordinator.stats().rejected, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_event_channel_times_out() {
        let net = ScriptedNetwork::new(
            vec![ScriptedPeer::endorsing("peer0", b"ok")],
            CommitScript::Silent,
            config(),
        );
        let request = request(&net);
        let tx_id = request.tx_id().clone();

        let err = net.coordinator.submit(request).await.unwrap_err();

        match &err {
            SubmissionError::CommitTimeout { tx_id: id, waited } => {
                assert_eq!(id, &tx_id);
                assert_eq!(*waited, Duration::from_secs(30));
            }
            other => panic!("expected CommitTimeout, got {other:?}"),
        }
        assert_eq!(err.commit_outcome(), Some(CommitOutcome::Timeout));
        assert_eq!(net.orderer.broadcasts(), 1);
        assert!(!net.hub.is_registered(&tx_id));
        assert_eq!(net.hub.stats().total_unregistered, 1);
        assert_eq!(net.coordinator.stats().timed_out, 1);
    }

    #[tokio::test]
    async fn test_invalid_event_is_commit_invalid() {
        let net = ScriptedNetwork::new(
            vec![ScriptedPeer::endorsing("peer0", b"ok")],
            CommitScript::Report(ValidationCode::parse("INVALID"), Duration::from_millis(5)),
            config(),
        );

        let err = net.coordinator.submit(request(&net)).await.unwrap_err();

        assert_eq!(
            err,
            SubmissionError::CommitInvalid(ValidationCode::Other("INVALID".into()))
        );
        assert_eq!(err.to_string(), "Transaction invalidated by committer: INVALID");
        assert_eq!(net.hub.listener_count(), 0);
        assert_eq!(net.coordinator.stats().invalid, 1);
    }

    #[tokio::test]
    async fn test_first_response_decides_by_default() {
        let net = ScriptedNetwork::new(
            vec![
                ScriptedPeer::endorsing("peer0", b"ok"),
                ScriptedPeer::new("peer1", 500, "peer1 disagrees", b""),
            ],
            CommitScript::Report(ValidationCode::Valid, Duration::from_millis(5)),
            config(),
        );

        let receipt = net.coordinator.submit(request(&net)).await.unwrap();
        assert_eq!(receipt.outcome, CommitOutcome::Valid);
    }

    #[tokio::test]
    async fn test_all_must_agree_rejects_a_dissenting_peer() {
        let net = ScriptedNetwork::new(
            vec![
                ScriptedPeer::endorsing("peer0", b"ok"),
                ScriptedPeer::new("peer1", 500, "peer1 disagrees", b""),
            ],
            CommitScript::Report(ValidationCode::Valid, Duration::from_millis(5)),
            config().with_policy(EndorsementPolicy::AllMustAgree),
        );

        let err = net.coordinator.submit(request(&net)).await.unwrap_err();
        assert_eq!(
            err,
            SubmissionError::ProposalRejected {
                message: "peer1 disagrees".into()
            }
        );
        assert_eq!(net.orderer.broadcasts(), 0);
    }
}
