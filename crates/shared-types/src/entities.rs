//! # Core Domain Entities
//!
//! Identifiers and identities shared by every participant of a transaction.
//!
//! ## Entities
//!
//! - **Identity**: `Creator` (MSP id plus signed certificate)
//! - **Addressing**: `PeerEndpoint`
//! - **Tracking**: `TransactionId`

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of the random nonce mixed into every transaction id.
pub const NONCE_LEN: usize = 24;

/// Serialized identity of the client submitting a proposal.
///
/// The certificate is carried as opaque PEM bytes; nothing in the
/// submission path parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Membership service provider the identity belongs to.
    pub msp_id: String,
    /// Signed enrollment certificate (PEM).
    pub certificate: Vec<u8>,
}

impl Creator {
    pub fn new(msp_id: impl Into<String>, certificate: Vec<u8>) -> Self {
        Self {
            msp_id: msp_id.into(),
            certificate,
        }
    }

    /// Bytes used when deriving transaction ids and endorsement identities.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.msp_id.len() + self.certificate.len());
        bytes.extend_from_slice(self.msp_id.as_bytes());
        bytes.extend_from_slice(&self.certificate);
        bytes
    }
}

/// Network location of a peer, orderer or event endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerEndpoint {
    /// Human-readable name (e.g. `peer0.berger-levrault.com`).
    pub name: String,
    /// Address (e.g. `grpc://localhost:7051`).
    pub url: String,
}

impl PeerEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for PeerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.url)
    }
}

/// Opaque, unique identifier of one transaction.
///
/// Derived as `hex(sha256(nonce || creator))` so it is bound to the
/// submitting identity. A fresh id is required for every invocation,
/// including retries of a failed one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Mint a new id for `creator` from a fresh random nonce.
    pub fn generate(creator: &Creator) -> Self {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        Self::derive(&nonce, creator)
    }

    /// Deterministic derivation from an explicit nonce.
    pub fn derive(nonce: &[u8], creator: &Creator) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(nonce);
        hasher.update(creator.to_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap an id received from the network.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for log lines.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(8);
        &self.0[..end]
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
