//! Domain module for the development ledger.

pub mod contract;
pub mod errors;
pub mod world_state;

pub use contract::*;
pub use errors::LedgerError;
pub use world_state::{CommittedBlock, VersionedValue, WorldState};
