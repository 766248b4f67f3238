//! Network session.
//!
//! Built once at startup and shared read-only by every invocation: the
//! client identity, the channel and chaincode to target, and handles to
//! the peers, the orderer and the commit event source.

use crate::domain::errors::SessionError;
use crate::ports::outbound::{CommitEventSource, EndorsingPeer, OrderingService, ProposalSigner};
use shared_types::{Creator, InvocationRequest, PeerEndpoint, TransactionId};
use std::sync::Arc;

/// Immutable connection context for one user on one channel.
pub struct NetworkSession {
    user_id: String,
    creator: Creator,
    channel_id: String,
    chaincode_id: String,
    signer: Arc<dyn ProposalSigner>,
    peers: Vec<Arc<dyn EndorsingPeer>>,
    orderer: Arc<dyn OrderingService>,
    events: Arc<dyn CommitEventSource>,
}

impl NetworkSession {
    pub fn builder() -> NetworkSessionBuilder {
        NetworkSessionBuilder::default()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn creator(&self) -> &Creator {
        &self.creator
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn chaincode_id(&self) -> &str {
        &self.chaincode_id
    }

    pub fn signer(&self) -> &dyn ProposalSigner {
        self.signer.as_ref()
    }

    pub fn orderer(&self) -> &dyn OrderingService {
        self.orderer.as_ref()
    }

    pub fn events(&self) -> &dyn CommitEventSource {
        self.events.as_ref()
    }

    /// Endpoints of every endorsing peer, in configuration order.
    pub fn endorsing_targets(&self) -> Vec<PeerEndpoint> {
        self.peers.iter().map(|p| p.endpoint().clone()).collect()
    }

    /// Connection to the peer at `endpoint`.
    pub fn peer(&self, endpoint: &PeerEndpoint) -> Option<&Arc<dyn EndorsingPeer>> {
        self.peers.iter().find(|p| p.endpoint() == endpoint)
    }

    /// New request for `function(args)` with a freshly minted tx id,
    /// targeting every endorsing peer.
    pub fn new_request(&self, function: &str, args: Vec<String>) -> InvocationRequest {
        InvocationRequest::new(
            self.endorsing_targets(),
            self.chaincode_id.clone(),
            function,
            args,
            self.channel_id.clone(),
            TransactionId::generate(&self.creator),
        )
    }
}

impl std::fmt::Debug for NetworkSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkSession")
            .field("user_id", &self.user_id)
            .field("msp_id", &self.creator.msp_id)
            .field("channel_id", &self.channel_id)
            .field("chaincode_id", &self.chaincode_id)
            .field("peers", &self.endorsing_targets())
            .field("orderer", self.orderer.endpoint())
            .finish()
    }
}

/// Builder for [`NetworkSession`].
#[derive(Default)]
pub struct NetworkSessionBuilder {
    user_id: Option<String>,
    creator: Option<Creator>,
    channel_id: Option<String>,
    chaincode_id: Option<String>,
    signer: Option<Arc<dyn ProposalSigner>>,
    peers: Vec<Arc<dyn EndorsingPeer>>,
    orderer: Option<Arc<dyn OrderingService>>,
    events: Option<Arc<dyn CommitEventSource>>,
}

impl NetworkSessionBuilder {
    pub fn user(mut self, user_id: impl Into<String>, creator: Creator) -> Self {
        self.user_id = Some(user_id.into());
        self.creator = Some(creator);
        self
    }

    pub fn channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn chaincode(mut self, chaincode_id: impl Into<String>) -> Self {
        self.chaincode_id = Some(chaincode_id.into());
        self
    }

    pub fn signer(mut self, signer: Arc<dyn ProposalSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn peer(mut self, peer: Arc<dyn EndorsingPeer>) -> Self {
        self.peers.push(peer);
        self
    }

    pub fn orderer(mut self, orderer: Arc<dyn OrderingService>) -> Self {
        self.orderer = Some(orderer);
        self
    }

    pub fn events(mut self, events: Arc<dyn CommitEventSource>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<NetworkSession, SessionError> {
        if self.peers.is_empty() {
            return Err(SessionError::NoEndorsingPeers);
        }
        Ok(NetworkSession {
            user_id: self.user_id.ok_or(SessionError::Missing("a user identity"))?,
            creator: self.creator.ok_or(SessionError::Missing("a user identity"))?,
            channel_id: self.channel_id.ok_or(SessionError::Missing("a channel id"))?,
            chaincode_id: self
                .chaincode_id
                .ok_or(SessionError::Missing("a chaincode id"))?,
            signer: self.signer.ok_or(SessionError::Missing("a signer"))?,
            peers: self.peers,
            orderer: self.orderer.ok_or(SessionError::Missing("an orderer"))?,
            events: self
                .events
                .ok_or(SessionError::Missing("a commit event source"))?,
        })
    }
}
