//! # Error Types
//!
//! Errors raised at the network boundary, shared by every port implementation.

use thiserror::Error;

/// Failure to talk to a peer, the orderer or the event endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Endpoint could not be reached.
    #[error("connection to {endpoint} failed: {reason}")]
    Connection { endpoint: String, reason: String },

    /// Endpoint did not answer in time.
    #[error("{endpoint} did not answer within {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// Event listener could not be registered.
    #[error("event listener setup failed: {0}")]
    Listener(String),

    /// Request or response could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Signing the outgoing message failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Endpoint has shut down.
    #[error("{0} is closed")]
    Closed(String),
}
