//! Chaincode execution.
//!
//! A chaincode runs against a [`TxSimulator`], which reads committed state
//! and records the read and write sets instead of changing the ledger.

mod digital_contracts;

pub use digital_contracts::{DigitalContractsChaincode, GENESIS_KEY};

use crate::domain::{LedgerError, WorldState};
use shared_types::{KvRead, KvWrite, ReadWriteSet};
use std::sync::Arc;

/// Smart contract executed by endorsing peers.
pub trait Chaincode: Send + Sync {
    /// Execute `function(args)` and return the response payload.
    fn invoke(
        &self,
        stub: &mut TxSimulator,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, LedgerError>;
}

/// Simulation context for one proposal.
pub struct TxSimulator {
    state: Arc<WorldState>,
    rw_set: ReadWriteSet,
}

impl TxSimulator {
    pub fn new(state: Arc<WorldState>) -> Self {
        Self {
            state,
            rw_set: ReadWriteSet::default(),
        }
    }

    /// Committed value of `key`, recording the version read.
    pub fn get_state(&mut self, key: &str) -> Option<Vec<u8>> {
        let current = self.state.get(key);
        if !self.rw_set.reads.iter().any(|read| read.key == key) {
            self.rw_set.reads.push(KvRead {
                key: key.to_string(),
                version: current.as_ref().map(|v| v.version),
            });
        }
        current.map(|v| v.value)
    }

    /// Stage a write. The ledger changes only when the block commits.
    pub fn put_state(&mut self, key: &str, value: Vec<u8>) {
        self.rw_set.writes.retain(|write| write.key != key);
        self.rw_set.writes.push(KvWrite {
            key: key.to_string(),
            value,
        });
    }

    pub fn into_rw_set(self) -> ReadWriteSet {
        self.rw_set
    }
}
