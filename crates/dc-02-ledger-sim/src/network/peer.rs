//! Simulated endorsing peer.

use crate::chaincode::{Chaincode, TxSimulator};
use crate::domain::{LedgerError, WorldState};
use async_trait::async_trait;
use dc_01_transaction_submission::{EcdsaSigner, EndorsingPeer, ProposalSigner};
use shared_types::{
    Endorsement, NetworkError, PeerEndpoint, ProposalResponse, ReadWriteSet, SignedProposal,
    STATUS_ERROR, STATUS_SUCCESS,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Peer that executes the chaincode against the shared world state and
/// signs successful results with its own key.
pub struct SimulatedPeer {
    endpoint: PeerEndpoint,
    chaincode_id: String,
    chaincode: Arc<dyn Chaincode>,
    state: Arc<WorldState>,
    signer: EcdsaSigner,
    latency: Duration,
    online: AtomicBool,
    proposals: AtomicU64,
}

impl SimulatedPeer {
    pub fn new(
        endpoint: PeerEndpoint,
        chaincode_id: impl Into<String>,
        chaincode: Arc<dyn Chaincode>,
        state: Arc<WorldState>,
    ) -> Self {
        Self {
            endpoint,
            chaincode_id: chaincode_id.into(),
            chaincode,
            state,
            signer: EcdsaSigner::generate(),
            latency: Duration::ZERO,
            online: AtomicBool::new(true),
            proposals: AtomicU64::new(0),
        }
    }

    /// Delay every proposal by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Take the peer off the network; proposals fail with a connection error.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Serialized endorser identity (compressed SEC1 public key).
    pub fn identity(&self) -> Vec<u8> {
        self.signer.public_key_bytes()
    }

    /// Proposals processed so far.
    pub fn proposals(&self) -> u64 {
        self.proposals.load(Ordering::Relaxed)
    }

    fn simulate(&self, signed: &SignedProposal) -> (Result<Vec<u8>, LedgerError>, ReadWriteSet) {
        let proposal = &signed.proposal;
        if proposal.chaincode_id != self.chaincode_id {
            return (
                Err(LedgerError::ChaincodeNotFound(proposal.chaincode_id.clone())),
                ReadWriteSet::default(),
            );
        }
        let mut stub = TxSimulator::new(self.state.clone());
        let result = self
            .chaincode
            .invoke(&mut stub, &proposal.function, &proposal.args);
        (result, stub.into_rw_set())
    }
}

#[async_trait]
impl EndorsingPeer for SimulatedPeer {
    fn endpoint(&self) -> &PeerEndpoint {
        &self.endpoint
    }

    async fn process_proposal(
        &self,
        signed: &SignedProposal,
    ) -> Result<ProposalResponse, NetworkError> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(NetworkError::Connection {
                endpoint: self.endpoint.to_string(),
                reason: "peer is offline".to_string(),
            });
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.proposals.fetch_add(1, Ordering::Relaxed);

        let tx_id = &signed.proposal.tx_id;
        let (result, rw_set) = self.simulate(signed);
        match result {
            Ok(payload) => {
                let signature = self.signer.sign(&ProposalResponse::endorsed_bytes(
                    tx_id,
                    STATUS_SUCCESS,
                    &payload,
                    &rw_set,
                ))?;
                debug!(
                    peer = %self.endpoint.name,
                    tx_id = %tx_id.short(),
                    function = %signed.proposal.function,
                    reads = rw_set.reads.len(),
                    writes = rw_set.writes.len(),
                    "Proposal endorsed"
                );
                Ok(ProposalResponse {
                    peer: self.endpoint.clone(),
                    status: STATUS_SUCCESS,
                    message: String::new(),
                    payload,
                    rw_set,
                    endorsement: Endorsement {
                        endorser: self.identity(),
                        signature,
                    },
                })
            }
            Err(e) => {
                warn!(
                    peer = %self.endpoint.name,
                    tx_id = %tx_id.short(),
                    error = %e,
                    "Chaincode returned an error"
                );
                Ok(ProposalResponse {
                    peer: self.endpoint.clone(),
                    status: STATUS_ERROR,
                    message: e.to_string(),
                    payload: Vec::new(),
                    rw_set: ReadWriteSet::default(),
                    endorsement: Endorsement {
                        endorser: self.identity(),
                        signature: Vec::new(),
                    },
                })
            }
        }
    }
}
