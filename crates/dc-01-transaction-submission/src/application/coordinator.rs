//! Transaction Submission Coordinator
//!
//! Drives one invocation through proposal, endorsement evaluation,
//! ordering and commit confirmation.

use crate::application::proposal::{collect_replies, sign_proposal};
use crate::application::session::NetworkSession;
use crate::config::SubmissionConfig;
use crate::domain::errors::SubmissionError;
use crate::domain::evaluation::evaluate;
use crate::domain::state::{SubmissionState, SubmissionTracker};
use serde::Serialize;
use shared_bus::{CommitEvent, CommitListener};
use shared_types::{
    CommitOutcome, InvocationRequest, NetworkError, PeerEndpoint, Proposal, ProposalResponse,
    TransactionEnvelope, TransactionId,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub tx_id: TransactionId,
    /// Status of the first endorsement response.
    pub status: i32,
    /// Message of the first endorsement response.
    pub message: String,
    /// Payload of the first endorsement response.
    pub payload: Vec<u8>,
    pub outcome: CommitOutcome,
    pub block_number: u64,
    /// Peer whose commit event confirmed the transaction.
    pub committed_by: PeerEndpoint,
}

impl SubmitReceipt {
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// Terminal outcome counters.
#[derive(Debug, Default)]
pub struct SubmissionStats {
    submitted: AtomicU64,
    committed: AtomicU64,
    rejected: AtomicU64,
    invalid: AtomicU64,
    timed_out: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`SubmissionStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionStatsSnapshot {
    pub submitted: u64,
    pub committed: u64,
    pub rejected: u64,
    pub invalid: u64,
    pub timed_out: u64,
    pub failed: u64,
}

impl SubmissionStats {
    pub fn snapshot(&self) -> SubmissionStatsSnapshot {
        SubmissionStatsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            committed: self.committed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            invalid: self.invalid.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    fn record(&self, state: &SubmissionState) {
        let counter = match state {
            SubmissionState::Completed(CommitOutcome::Valid) => &self.committed,
            SubmissionState::Completed(CommitOutcome::Invalid(_)) => &self.invalid,
            SubmissionState::Completed(CommitOutcome::Timeout) => &self.timed_out,
            SubmissionState::Rejected => &self.rejected,
            _ => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Transaction Submission Coordinator
///
/// Stateless between invocations apart from counters; every call to
/// [`submit`](Self::submit) owns its tx id and its listener registration.
pub struct TransactionCoordinator {
    session: Arc<NetworkSession>,
    config: SubmissionConfig,
    stats: SubmissionStats,
}

impl TransactionCoordinator {
    pub fn new(session: Arc<NetworkSession>, config: SubmissionConfig) -> Self {
        Self {
            session,
            config,
            stats: SubmissionStats::default(),
        }
    }

    pub fn session(&self) -> &Arc<NetworkSession> {
        &self.session
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    pub fn stats(&self) -> SubmissionStatsSnapshot {
        self.stats.snapshot()
    }

    /// Submit `request` and wait for its commit.
    ///
    /// Produces exactly one terminal result. A rejected proposal never
    /// reaches ordering and never registers a listener.
    pub async fn submit(
        &self,
        request: InvocationRequest,
    ) -> Result<SubmitReceipt, SubmissionError> {
        let tx_id = request.tx_id().clone();
        let mut tracker = SubmissionTracker::new(tx_id.clone());
        self.stats.submitted.fetch_add(1, Ordering::Relaxed);

        info!(
            tx_id = %tx_id,
            function = request.function(),
            targets = request.endorsing_targets().len(),
            "Assigning transaction id"
        );

        let result = self.run(&request, &mut tracker).await;
        if !tracker.state().is_terminal() {
            let terminal = match result.as_ref().err().and_then(|e| e.commit_outcome()) {
                Some(outcome) => SubmissionState::Completed(outcome),
                None => SubmissionState::Failed,
            };
            tracker.advance(terminal);
        }
        self.stats.record(tracker.state());
        result
    }

    async fn run(
        &self,
        request: &InvocationRequest,
        tracker: &mut SubmissionTracker,
    ) -> Result<SubmitReceipt, SubmissionError> {
        let tx_id = request.tx_id();

        // Proposing
        let signed = sign_proposal(&self.session, request)?;
        let replies =
            collect_replies(&self.session, request, &signed, self.config.proposal_timeout).await;
        tracker.advance(SubmissionState::Evaluating);

        // Evaluating
        let endorsed = match evaluate(&replies, self.config.endorsement_policy) {
            Ok(endorsed) => endorsed,
            Err(e) => {
                warn!(tx_id = %tx_id.short(), error = %e, "Transaction proposal was bad");
                tracker.advance(SubmissionState::Rejected);
                return Err(e);
            }
        };
        info!(
            tx_id = %tx_id.short(),
            status = endorsed.first.status,
            message = %endorsed.first.message,
            endorsements = endorsed.responses.len(),
            "Transaction proposal was good"
        );
        tracker.advance(SubmissionState::Ordering);

        // Ordering: listener first, so an early event cannot be missed
        let mut listener = self.session.events().listen(tx_id).await?;
        let result = self
            .order_and_confirm(signed.proposal, endorsed.responses, &mut listener, tracker)
            .await;
        listener.unregister();

        let event = result?;
        tracker.advance(SubmissionState::Completed(CommitOutcome::Valid));
        info!(
            tx_id = %tx_id.short(),
            peer = %event.peer,
            block = event.block_number,
            "Transaction committed"
        );

        Ok(SubmitReceipt {
            tx_id: tx_id.clone(),
            status: endorsed.first.status,
            message: endorsed.first.message,
            payload: endorsed.first.payload,
            outcome: CommitOutcome::Valid,
            block_number: event.block_number,
            committed_by: event.peer,
        })
    }

    /// Broadcast the envelope and race acknowledgment, commit event and
    /// deadline. Success needs both a 200 acknowledgment and a VALID event.
    async fn order_and_confirm(
        &self,
        proposal: Proposal,
        responses: Vec<ProposalResponse>,
        listener: &mut CommitListener,
        tracker: &mut SubmissionTracker,
    ) -> Result<CommitEvent, SubmissionError> {
        let tx_id = proposal.tx_id.clone();
        let signature = self
            .session
            .signer()
            .sign(&TransactionEnvelope::signing_bytes(&proposal, &responses))?;
        let envelope = TransactionEnvelope {
            proposal,
            responses,
            signature,
        };

        let timeout = self.config.commit_timeout;
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);
        let broadcast = self.session.orderer().broadcast(envelope);
        tokio::pin!(broadcast);
        tracker.advance(SubmissionState::AwaitingCommit);

        let mut acknowledged = false;
        let mut committed: Option<CommitEvent> = None;

        loop {
            tokio::select! {
                ack = &mut broadcast, if !acknowledged => {
                    let ack = ack?;
                    if !ack.is_success() {
                        warn!(
                            tx_id = %tx_id.short(),
                            status = ack.status,
                            info = %ack.info,
                            "Failed to order the transaction"
                        );
                        return Err(SubmissionError::OrderingFailed {
                            status: ack.status,
                            message: ack.info,
                        });
                    }
                    debug!(tx_id = %tx_id.short(), "Ordering acknowledged");
                    acknowledged = true;
                }
                event = listener.recv(), if committed.is_none() => {
                    let event = event.ok_or_else(|| {
                        NetworkError::Closed("commit event stream".to_string())
                    })?;
                    if !event.is_valid() {
                        warn!(
                            tx_id = %tx_id.short(),
                            code = %event.code,
                            "The transaction was invalid"
                        );
                        return Err(SubmissionError::CommitInvalid(event.code));
                    }
                    debug!(tx_id = %tx_id.short(), "Commit event received");
                    committed = Some(event);
                }
                _ = &mut deadline => {
                    warn!(
                        tx_id = %tx_id.short(),
                        acknowledged,
                        timeout_ms = timeout.as_millis() as u64,
                        "Failed to send transaction and get notifications within the timeout period"
                    );
                    return Err(SubmissionError::CommitTimeout { tx_id, waited: timeout });
                }
            }

            if acknowledged {
                if let Some(event) = committed.take() {
                    return Ok(event);
                }
            }
        }
    }
}
