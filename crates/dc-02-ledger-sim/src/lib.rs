//! # DC-02: Development Ledger
//!
//! An in-process stand-in for the peer network the gateway talks to.
//!
//! ```text
//!   client ──proposal──→ SimulatedPeer ×N ──(TxSimulator)──→ WorldState (read)
//!     │
//!     └──envelope──→ SimulatedOrderer ──ack──→ client
//!                          │ block_delay
//!                          ▼
//!                   validate + commit ──→ WorldState (write)
//!                          │
//!                          ▼
//!                   CommitEventHub ──CommitEvent──→ listener
//! ```
//!
//! Peers implement the submission subsystem's `EndorsingPeer` port, the
//! orderer implements `OrderingService`, and the hub already implements
//! `CommitEventSource`, so a [`DevNetwork`] plugs straight into a
//! `NetworkSession`.
//!
//! Validation runs in order: duplicate transaction id, endorsement
//! signatures and agreement, then MVCC read versions.

pub mod chaincode;
pub mod domain;
pub mod network;

pub use chaincode::{Chaincode, DigitalContractsChaincode, TxSimulator, GENESIS_KEY};
pub use domain::{
    CommittedBlock, Contract, ContractSignature, ContractState, ContractStateHeading,
    LedgerError, Payment, Signatory, SignatoryStatus, VersionedValue, WorldState,
};
pub use network::{
    DevNetwork, DevNetworkConfig, SimulatedOrderer, SimulatedPeer, DEFAULT_CHAINCODE_ID,
    DEFAULT_CHANNEL_ID,
};
