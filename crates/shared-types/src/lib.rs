//! # Shared Types Crate
//!
//! This crate contains the data model exchanged between the gateway, the
//! submission coordinator and the ledger network.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-crate type is defined here.
//! - **Immutable Requests**: an `InvocationRequest` is built once per call and
//!   only read afterwards.
//! - **Fresh Identifiers**: every `TransactionId` is minted from a random nonce
//!   and the creator identity; nothing in the workspace reuses one.

pub mod entities;
pub mod errors;
pub mod invocation;
pub mod outcome;
pub mod responses;

pub use entities::*;
pub use errors::*;
pub use invocation::*;
pub use outcome::*;
pub use responses::*;

/// Status code a peer or orderer returns for a successful operation.
pub const STATUS_SUCCESS: i32 = 200;

/// Status code returned by chaincode on failure.
pub const STATUS_ERROR: i32 = 500;
