//! In-process network: endorsing peers, an orderer and the commit event hub
//! sharing one world state.

mod orderer;
mod peer;

pub use orderer::SimulatedOrderer;
pub use peer::SimulatedPeer;

use crate::chaincode::{Chaincode, DigitalContractsChaincode};
use crate::domain::WorldState;
use dc_01_transaction_submission::{NetworkSession, ProposalSigner, SessionError};
use shared_bus::CommitEventHub;
use shared_types::{Creator, PeerEndpoint};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_CHANNEL_ID: &str = "digital-contracts-channel";
pub const DEFAULT_CHAINCODE_ID: &str = "digital-contracts-chaincode";

/// Shape of a development network.
#[derive(Debug, Clone)]
pub struct DevNetworkConfig {
    pub channel_id: String,
    pub chaincode_id: String,
    pub peers: Vec<PeerEndpoint>,
    pub orderer: PeerEndpoint,
    /// Time between acknowledging a broadcast and committing its block.
    pub block_delay: Duration,
    /// Processing delay added by every peer.
    pub peer_latency: Duration,
}

impl Default for DevNetworkConfig {
    fn default() -> Self {
        Self {
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            chaincode_id: DEFAULT_CHAINCODE_ID.to_string(),
            peers: vec![PeerEndpoint::new(
                "peer0.berger-levrault.com",
                "grpc://localhost:7051",
            )],
            orderer: PeerEndpoint::new("orderer.berger-levrault.com", "grpc://localhost:7050"),
            block_delay: Duration::from_millis(20),
            peer_latency: Duration::ZERO,
        }
    }
}

/// A running development network.
pub struct DevNetwork {
    config: DevNetworkConfig,
    state: Arc<WorldState>,
    hub: CommitEventHub,
    peers: Vec<Arc<SimulatedPeer>>,
    orderer: Arc<SimulatedOrderer>,
}

impl DevNetwork {
    /// Network running the digital-contracts chaincode.
    pub fn new(config: DevNetworkConfig) -> Self {
        Self::with_chaincode(config, Arc::new(DigitalContractsChaincode))
    }

    pub fn with_chaincode(config: DevNetworkConfig, chaincode: Arc<dyn Chaincode>) -> Self {
        let state = Arc::new(WorldState::new());
        let hub = CommitEventHub::new();

        let peers: Vec<Arc<SimulatedPeer>> = config
            .peers
            .iter()
            .map(|endpoint| {
                Arc::new(
                    SimulatedPeer::new(
                        endpoint.clone(),
                        config.chaincode_id.clone(),
                        chaincode.clone(),
                        state.clone(),
                    )
                    .with_latency(config.peer_latency),
                )
            })
            .collect();

        // Events are reported by the first peer, like an event hub attached to it.
        let committer = config
            .peers
            .first()
            .cloned()
            .unwrap_or_else(|| config.orderer.clone());
        let orderer = Arc::new(SimulatedOrderer::new(
            config.orderer.clone(),
            committer,
            state.clone(),
            hub.clone(),
            config.block_delay,
        ));

        info!(
            channel = %config.channel_id,
            chaincode = %config.chaincode_id,
            peers = peers.len(),
            "Development network started"
        );

        Self {
            config,
            state,
            hub,
            peers,
            orderer,
        }
    }

    pub fn config(&self) -> &DevNetworkConfig {
        &self.config
    }

    pub fn state(&self) -> &Arc<WorldState> {
        &self.state
    }

    pub fn hub(&self) -> &CommitEventHub {
        &self.hub
    }

    pub fn peers(&self) -> &[Arc<SimulatedPeer>] {
        &self.peers
    }

    pub fn orderer(&self) -> &Arc<SimulatedOrderer> {
        &self.orderer
    }

    /// Client session for `user_id` with every peer as an endorsing target.
    pub fn session(
        &self,
        user_id: &str,
        creator: Creator,
        signer: Arc<dyn ProposalSigner>,
    ) -> Result<NetworkSession, SessionError> {
        let mut builder = NetworkSession::builder()
            .user(user_id, creator)
            .channel(self.config.channel_id.clone())
            .chaincode(self.config.chaincode_id.clone())
            .signer(signer)
            .orderer(self.orderer.clone())
            .events(Arc::new(self.hub.clone()));
        for peer in &self.peers {
            builder = builder.peer(peer.clone());
        }
        builder.build()
    }
}
