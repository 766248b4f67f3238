//! # Scripted Network Ports
//!
//! Peers and an orderer whose answers are fixed up front, wired to a real
//! commit event hub and a real ECDSA signer. Used where the development
//! network cannot produce an outcome on demand (a peer that always answers
//! 500, an orderer that never reports, a bare `INVALID` code).

use async_trait::async_trait;
use dc_01_transaction_submission::{
    EcdsaSigner, EndorsingPeer, NetworkSession, OrderingService, SubmissionConfig,
    TransactionCoordinator,
};
use shared_bus::{CommitEvent, CommitEventHub, EventPublisher};
use shared_types::{
    BroadcastResponse, Creator, Endorsement, NetworkError, PeerEndpoint, ProposalResponse,
    ReadWriteSet, SignedProposal, TransactionEnvelope, ValidationCode,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const CHANNEL: &str = "digital-contracts-channel";
pub const CHAINCODE: &str = "digital-contracts-chaincode";

/// Endorsing peer answering every proposal with the same status.
pub struct ScriptedPeer {
    endpoint: PeerEndpoint,
    status: i32,
    message: String,
    payload: Vec<u8>,
    calls: AtomicUsize,
}

impl ScriptedPeer {
    pub fn new(name: &str, status: i32, message: &str, payload: &[u8]) -> Self {
        Self {
            endpoint: PeerEndpoint::new(name, format!("grpc://{name}:7051")),
            status,
            message: message.to_string(),
            payload: payload.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn endorsing(name: &str, payload: &[u8]) -> Self {
        Self::new(name, 200, "", payload)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EndorsingPeer for ScriptedPeer {
    fn endpoint(&self) -> &PeerEndpoint {
        &self.endpoint
    }

    async fn process_proposal(
        &self,
        _proposal: &SignedProposal,
    ) -> Result<ProposalResponse, NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProposalResponse {
            peer: self.endpoint.clone(),
            status: self.status,
            message: self.message.clone(),
            payload: self.payload.clone(),
            rw_set: ReadWriteSet::default(),
            endorsement: Endorsement {
                endorser: self.endpoint.name.as_bytes().to_vec(),
                signature: vec![0x30, 0x45],
            },
        })
    }
}

/// What the scripted orderer reports after acknowledging a broadcast.
#[derive(Clone, Debug)]
pub enum CommitScript {
    /// Publish `code` once `delay` has passed.
    Report(ValidationCode, Duration),
    /// Publish with a random delay below the bound, to shuffle event order.
    Jittered(ValidationCode, Duration),
    /// Acknowledge and stay silent.
    Silent,
}

/// Ordering service that acknowledges everything and reports per script.
pub struct ScriptedOrderer {
    endpoint: PeerEndpoint,
    hub: CommitEventHub,
    script: CommitScript,
    broadcasts: AtomicUsize,
}

impl ScriptedOrderer {
    pub fn new(hub: CommitEventHub, script: CommitScript) -> Self {
        Self {
            endpoint: PeerEndpoint::new("orderer0", "grpc://orderer0:7050"),
            hub,
            script,
            broadcasts: AtomicUsize::new(0),
        }
    }

    pub fn broadcasts(&self) -> usize {
        self.broadcasts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderingService for ScriptedOrderer {
    fn endpoint(&self) -> &PeerEndpoint {
        &self.endpoint
    }

    async fn broadcast(
        &self,
        envelope: TransactionEnvelope,
    ) -> Result<BroadcastResponse, NetworkError> {
        let block = self.broadcasts.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        let (code, delay) = match &self.script {
            CommitScript::Report(code, delay) => (code.clone(), *delay),
            CommitScript::Jittered(code, bound) => {
                let millis = rand::random::<u64>() % (bound.as_millis() as u64).max(1);
                (code.clone(), Duration::from_millis(millis))
            }
            CommitScript::Silent => return Ok(BroadcastResponse::success()),
        };

        let hub = self.hub.clone();
        let event = CommitEvent::new(
            envelope.tx_id().clone(),
            code,
            block,
            PeerEndpoint::new("peer0", "grpc://peer0:7053"),
        );
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            hub.publish(event);
        });
        Ok(BroadcastResponse::success())
    }
}

/// Coordinator over scripted ports, with handles kept for assertions.
pub struct ScriptedNetwork {
    pub hub: CommitEventHub,
    pub peers: Vec<Arc<ScriptedPeer>>,
    pub orderer: Arc<ScriptedOrderer>,
    pub coordinator: TransactionCoordinator,
}

impl ScriptedNetwork {
    pub fn new(peers: Vec<ScriptedPeer>, script: CommitScript, config: SubmissionConfig) -> Self {
        let hub = CommitEventHub::new();
        let peers: Vec<Arc<ScriptedPeer>> = peers.into_iter().map(Arc::new).collect();
        let orderer = Arc::new(ScriptedOrderer::new(hub.clone(), script));

        let mut builder = NetworkSession::builder()
            .user("BLOperator", Creator::new("BlMSP", b"cert".to_vec()))
            .channel(CHANNEL)
            .chaincode(CHAINCODE)
            .signer(Arc::new(EcdsaSigner::generate()))
            .orderer(orderer.clone())
            .events(Arc::new(hub.clone()));
        for peer in &peers {
            builder = builder.peer(peer.clone());
        }
        let session = builder.build().expect("scripted session");

        Self {
            hub,
            peers,
            orderer,
            coordinator: TransactionCoordinator::new(Arc::new(session), config),
        }
    }

    /// Total proposals seen by every peer.
    pub fn proposals(&self) -> usize {
        self.peers.iter().map(|p| p.calls()).sum()
    }
}
