//! Simulated ordering service and committing peer.
//!
//! A broadcast is acknowledged immediately. The transaction is then cut
//! into its own block after `block_delay`, validated against the world
//! state and announced on the commit event hub.

use crate::domain::WorldState;
use async_trait::async_trait;
use dc_01_transaction_submission::{verify_signature, OrderingService};
use p256::ecdsa::VerifyingKey;
use shared_bus::{CommitEvent, CommitEventHub, EventPublisher};
use shared_types::{
    BroadcastResponse, NetworkError, PeerEndpoint, ProposalResponse, TransactionEnvelope,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct SimulatedOrderer {
    endpoint: PeerEndpoint,
    committer: PeerEndpoint,
    state: Arc<WorldState>,
    hub: CommitEventHub,
    block_delay: Duration,
    deliver_events: Arc<AtomicBool>,
    broadcasts: AtomicU64,
}

impl SimulatedOrderer {
    /// `committer` is the peer named in emitted commit events.
    pub fn new(
        endpoint: PeerEndpoint,
        committer: PeerEndpoint,
        state: Arc<WorldState>,
        hub: CommitEventHub,
        block_delay: Duration,
    ) -> Self {
        Self {
            endpoint,
            committer,
            state,
            hub,
            block_delay,
            deliver_events: Arc::new(AtomicBool::new(true)),
            broadcasts: AtomicU64::new(0),
        }
    }

    /// Stop (or resume) publishing commit events. Blocks are still committed.
    pub fn set_event_delivery(&self, enabled: bool) {
        self.deliver_events.store(enabled, Ordering::SeqCst);
    }

    /// Envelopes accepted so far.
    pub fn broadcasts(&self) -> u64 {
        self.broadcasts.load(Ordering::Relaxed)
    }

    fn reject(status: i32, info: &str) -> BroadcastResponse {
        BroadcastResponse {
            status,
            info: info.to_string(),
        }
    }
}

#[async_trait]
impl OrderingService for SimulatedOrderer {
    fn endpoint(&self) -> &PeerEndpoint {
        &self.endpoint
    }

    async fn broadcast(
        &self,
        envelope: TransactionEnvelope,
    ) -> Result<BroadcastResponse, NetworkError> {
        if envelope.responses.is_empty() {
            warn!(tx_id = %envelope.tx_id().short(), "Envelope carries no endorsements");
            return Ok(Self::reject(400, "BAD_REQUEST"));
        }
        if envelope.signature.is_empty() {
            warn!(tx_id = %envelope.tx_id().short(), "Envelope is not signed");
            return Ok(Self::reject(403, "FORBIDDEN"));
        }
        self.broadcasts.fetch_add(1, Ordering::Relaxed);

        let state = self.state.clone();
        let hub = self.hub.clone();
        let committer = self.committer.clone();
        let deliver = self.deliver_events.clone();
        let delay = self.block_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let endorsed = endorsements_valid(&envelope);
            let tx_id = envelope.tx_id().clone();
            let block = state.commit_block(&tx_id, &envelope.responses[0].rw_set, endorsed);
            info!(
                tx_id = %tx_id.short(),
                block = block.number,
                code = %block.code,
                "Transaction committed"
            );
            if deliver.load(Ordering::SeqCst) {
                hub.publish(CommitEvent::new(tx_id, block.code, block.number, committer));
            } else {
                debug!(tx_id = %tx_id.short(), "Commit event suppressed");
            }
        });

        Ok(BroadcastResponse::success())
    }
}

/// Every response succeeded, all agree on the result and every
/// endorsement signature checks out.
fn endorsements_valid(envelope: &TransactionEnvelope) -> bool {
    let Some(first) = envelope.responses.first() else {
        return false;
    };
    envelope.responses.iter().all(|response| {
        response.is_success()
            && response.payload == first.payload
            && response.rw_set == first.rw_set
            && endorsement_verifies(envelope, response)
    })
}

fn endorsement_verifies(envelope: &TransactionEnvelope, response: &ProposalResponse) -> bool {
    let Ok(key) = VerifyingKey::from_sec1_bytes(&response.endorsement.endorser) else {
        return false;
    };
    let message = ProposalResponse::endorsed_bytes(
        envelope.tx_id(),
        response.status,
        &response.payload,
        &response.rw_set,
    );
    verify_signature(&key, &message, &response.endorsement.signature)
}
