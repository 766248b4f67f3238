//! # Endorsement and Ordering Responses
//!
//! What endorsing peers and the ordering service send back.

use crate::entities::{PeerEndpoint, TransactionId};
use crate::invocation::Proposal;
use crate::STATUS_SUCCESS;
use serde::{Deserialize, Serialize};

/// A key read during simulation, with the version observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvRead {
    pub key: String,
    /// `None` when the key did not exist at simulation time.
    pub version: Option<u64>,
}

/// A key written during simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvWrite {
    pub key: String,
    pub value: Vec<u8>,
}

/// Simulation results attached to a proposal response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadWriteSet {
    pub reads: Vec<KvRead>,
    pub writes: Vec<KvWrite>,
}

impl ReadWriteSet {
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}

/// A peer's signed attestation over a proposal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    /// Serialized identity of the endorsing peer.
    pub endorser: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Response of one endorsing peer to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    /// Peer that produced this response.
    pub peer: PeerEndpoint,
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
    pub rw_set: ReadWriteSet,
    pub endorsement: Endorsement,
}

impl ProposalResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Payload as UTF-8, lossily.
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Bytes covered by the endorsement signature.
    pub fn endorsed_bytes(
        tx_id: &TransactionId,
        status: i32,
        payload: &[u8],
        rw_set: &ReadWriteSet,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(tx_id.as_str().as_bytes());
        out.extend_from_slice(&status.to_be_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
        for read in &rw_set.reads {
            out.extend_from_slice(read.key.as_bytes());
            out.extend_from_slice(&read.version.unwrap_or(u64::MAX).to_be_bytes());
        }
        for write in &rw_set.writes {
            out.extend_from_slice(write.key.as_bytes());
            out.extend_from_slice(&write.value);
        }
        out
    }
}

/// One slot of the collected endorsement results.
///
/// Slots keep the order of the request's endorsing targets; a peer that
/// could not be reached still occupies its slot as `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerReply {
    Response(ProposalResponse),
    Error { peer: PeerEndpoint, message: String },
}

impl PeerReply {
    pub fn peer(&self) -> &PeerEndpoint {
        match self {
            PeerReply::Response(r) => &r.peer,
            PeerReply::Error { peer, .. } => peer,
        }
    }

    pub fn as_response(&self) -> Option<&ProposalResponse> {
        match self {
            PeerReply::Response(r) => Some(r),
            PeerReply::Error { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.as_response().is_some_and(ProposalResponse::is_success)
    }
}

/// Endorsed transaction sent to the ordering service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub proposal: Proposal,
    pub responses: Vec<ProposalResponse>,
    /// Client signature over `signing_bytes`.
    pub signature: Vec<u8>,
}

impl TransactionEnvelope {
    pub fn tx_id(&self) -> &TransactionId {
        &self.proposal.tx_id
    }

    /// Bytes covered by the client signature on the envelope.
    pub fn signing_bytes(proposal: &Proposal, responses: &[ProposalResponse]) -> Vec<u8> {
        let mut out = proposal.signing_bytes();
        for response in responses {
            out.extend_from_slice(&response.endorsement.signature);
        }
        out
    }
}

/// Acknowledgment from the ordering service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub status: i32,
    pub info: String,
}

impl BroadcastResponse {
    pub fn success() -> Self {
        Self {
            status: STATUS_SUCCESS,
            info: "SUCCESS".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}
