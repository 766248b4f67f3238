//! # Invocation and Proposal Types
//!
//! An `InvocationRequest` describes one chaincode call; a `Proposal` is the
//! unsigned message derived from it, and a `SignedProposal` is what endorsing
//! peers receive.

use crate::entities::{Creator, PeerEndpoint, TransactionId};
use serde::{Deserialize, Serialize};

/// One chaincode invocation, created per incoming call.
///
/// There are no setters: once built the request is only read. A retry must
/// construct a new request with a newly minted `TransactionId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    endorsing_targets: Vec<PeerEndpoint>,
    chaincode_id: String,
    function: String,
    args: Vec<String>,
    channel_id: String,
    tx_id: TransactionId,
}

impl InvocationRequest {
    pub fn new(
        endorsing_targets: Vec<PeerEndpoint>,
        chaincode_id: impl Into<String>,
        function: impl Into<String>,
        args: Vec<String>,
        channel_id: impl Into<String>,
        tx_id: TransactionId,
    ) -> Self {
        Self {
            endorsing_targets,
            chaincode_id: chaincode_id.into(),
            function: function.into(),
            args,
            channel_id: channel_id.into(),
            tx_id,
        }
    }

    pub fn endorsing_targets(&self) -> &[PeerEndpoint] {
        &self.endorsing_targets
    }

    pub fn chaincode_id(&self) -> &str {
        &self.chaincode_id
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn tx_id(&self) -> &TransactionId {
        &self.tx_id
    }

    /// Build the unsigned proposal for `creator`.
    pub fn to_proposal(&self, creator: &Creator) -> Proposal {
        Proposal {
            tx_id: self.tx_id.clone(),
            channel_id: self.channel_id.clone(),
            chaincode_id: self.chaincode_id.clone(),
            function: self.function.clone(),
            args: self.args.clone(),
            creator: creator.clone(),
        }
    }
}

/// Unsigned chaincode proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub tx_id: TransactionId,
    pub channel_id: String,
    pub chaincode_id: String,
    pub function: String,
    pub args: Vec<String>,
    pub creator: Creator,
}

impl Proposal {
    /// Canonical bytes covered by the client signature.
    ///
    /// Every field is length-prefixed so distinct proposals never share an
    /// encoding.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        push_field(&mut out, self.tx_id.as_str().as_bytes());
        push_field(&mut out, self.channel_id.as_bytes());
        push_field(&mut out, self.chaincode_id.as_bytes());
        push_field(&mut out, self.function.as_bytes());
        out.extend_from_slice(&(self.args.len() as u32).to_be_bytes());
        for arg in &self.args {
            push_field(&mut out, arg.as_bytes());
        }
        push_field(&mut out, &self.creator.to_bytes());
        out
    }
}

fn push_field(out: &mut Vec<u8>, field: &[u8]) {
    out.extend_from_slice(&(field.len() as u32).to_be_bytes());
    out.extend_from_slice(field);
}

/// A proposal together with the client's signature over `signing_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProposal {
    pub proposal: Proposal,
    pub signature: Vec<u8>,
}
