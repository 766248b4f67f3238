//! Chaincode errors.
//!
//! Display strings are the messages peers return to clients.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Ledger already initialized")]
    AlreadyInitialized,

    #[error("Wrong number of arguments. Expecting 2 arguments (key and value)")]
    ExpectedKeyAndValue,

    #[error("Wrong number of arguments. Given {0} expected 1 (a key)")]
    ExpectedKey(usize),

    #[error("Asset {0} already exists")]
    AssetExists(String),

    #[error("Asset with key {0} doesn't exist")]
    AssetNotFound(String),

    #[error("Trying to invoke unknown function {0}")]
    UnknownFunction(String),

    #[error("Chaincode {0} is not installed on this peer")]
    ChaincodeNotFound(String),

    #[error("{0}")]
    Serialization(String),
}
