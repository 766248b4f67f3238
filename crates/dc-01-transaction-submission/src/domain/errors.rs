//! Error types for Transaction Submission

use shared_types::{CommitOutcome, NetworkError, PeerEndpoint, TransactionId, ValidationCode};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Per-invocation failures of the submission workflow.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmissionError {
    /// Endorsement evaluation failed; nothing was sent to ordering.
    #[error("Transaction proposal rejected: {message}")]
    ProposalRejected { message: String },

    /// The ordering service refused the envelope.
    #[error("Ordering failed with status {status}: {message}")]
    OrderingFailed { status: i32, message: String },

    /// The transaction was committed with a non-VALID code.
    #[error("Transaction invalidated by committer: {0}")]
    CommitInvalid(ValidationCode),

    /// No commit event arrived before the deadline.
    #[error("Transaction {tx_id} not committed within {}ms", waited.as_millis())]
    CommitTimeout {
        tx_id: TransactionId,
        waited: Duration,
    },

    /// Transport failure at the network boundary.
    #[error(transparent)]
    Transport(#[from] NetworkError),
}

impl SubmissionError {
    /// Terminal commit outcome carried by this error, if ordering was reached.
    pub fn commit_outcome(&self) -> Option<CommitOutcome> {
        match self {
            SubmissionError::CommitInvalid(code) => Some(CommitOutcome::Invalid(code.clone())),
            SubmissionError::CommitTimeout { .. } => Some(CommitOutcome::Timeout),
            _ => None,
        }
    }

    /// Text suitable for a client response body.
    pub fn client_message(&self) -> String {
        match self {
            SubmissionError::ProposalRejected { message } => message.clone(),
            SubmissionError::OrderingFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Read-only query failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    /// The first peer could not be reached or failed to answer.
    #[error("Peer {endpoint} failed: {message}")]
    Peer {
        endpoint: PeerEndpoint,
        message: String,
    },

    /// The chaincode answered with a failure status.
    #[error("Chaincode returned status {status}: {message}")]
    Chaincode { status: i32, message: String },

    /// The session has no endorsing peers to ask.
    #[error("No query targets configured")]
    NoTargets,

    /// Signing the query proposal failed.
    #[error(transparent)]
    Transport(#[from] NetworkError),
}

/// Missing pieces when assembling a network session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Network session requires {0}")]
    Missing(&'static str),

    #[error("Network session requires at least one endorsing peer")]
    NoEndorsingPeers,
}

/// Failures loading MSP crypto material.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No private key found in {0}")]
    MissingKey(PathBuf),

    #[error("Expected exactly one private key in {dir}, found {count}")]
    AmbiguousKey { dir: PathBuf, count: usize },

    #[error("No signed certificate found in {0}")]
    MissingCertificate(PathBuf),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),
}
