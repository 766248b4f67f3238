//! Outbound Ports (Driven Ports / SPI)
//!
//! The ledger network as seen by the coordinator: endorsing peers, the
//! ordering service, the commit event endpoint and the client signer.

use async_trait::async_trait;
use shared_bus::CommitListener;
use shared_types::{
    BroadcastResponse, NetworkError, PeerEndpoint, ProposalResponse, SignedProposal,
    TransactionEnvelope, TransactionId,
};

/// A peer that simulates proposals and endorses the result.
#[async_trait]
pub trait EndorsingPeer: Send + Sync {
    /// Where this peer lives.
    fn endpoint(&self) -> &PeerEndpoint;

    /// Simulate `proposal` and return the signed response.
    ///
    /// Chaincode failures come back as a response with a non-200 status;
    /// `Err` means the peer could not produce a response at all.
    async fn process_proposal(
        &self,
        proposal: &SignedProposal,
    ) -> Result<ProposalResponse, NetworkError>;
}

/// The ordering service.
#[async_trait]
pub trait OrderingService: Send + Sync {
    fn endpoint(&self) -> &PeerEndpoint;

    /// Submit an endorsed envelope and return the acknowledgment.
    async fn broadcast(
        &self,
        envelope: TransactionEnvelope,
    ) -> Result<BroadcastResponse, NetworkError>;
}

/// Source of per-transaction commit notifications.
#[async_trait]
pub trait CommitEventSource: Send + Sync {
    /// Register interest in the commit event of `tx_id`.
    async fn listen(&self, tx_id: &TransactionId) -> Result<CommitListener, NetworkError>;
}

/// Signs outgoing proposals and envelopes with the client identity.
pub trait ProposalSigner: Send + Sync {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, NetworkError>;
}
