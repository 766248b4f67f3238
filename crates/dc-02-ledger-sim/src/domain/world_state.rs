//! Versioned world state.
//!
//! Every value carries the number of the block that wrote it. Validation
//! compares the versions a transaction read during simulation against the
//! current ones (MVCC).

use parking_lot::RwLock;
use shared_types::{KvRead, ReadWriteSet, TransactionId, ValidationCode};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A stored value and the block that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: u64,
}

/// Result of validating and committing one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedBlock {
    pub number: u64,
    pub code: ValidationCode,
}

#[derive(Default)]
struct LedgerInner {
    entries: HashMap<String, VersionedValue>,
    height: u64,
    seen: HashSet<TransactionId>,
}

/// Key/value ledger shared by every simulated peer and the orderer.
#[derive(Default)]
pub struct WorldState {
    inner: RwLock<LedgerInner>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<VersionedValue> {
        self.inner.read().entries.get(key).cloned()
    }

    /// Number of blocks committed so far.
    pub fn height(&self) -> u64 {
        self.inner.read().height
    }

    /// Number of keys with a value.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Whether a block already carried `tx_id`.
    pub fn has_seen(&self, tx_id: &TransactionId) -> bool {
        self.inner.read().seen.contains(tx_id)
    }

    /// Cut a one-transaction block, validate it and apply its writes if valid.
    ///
    /// `endorsed` is the orderer's verdict on the endorsements. Invalid
    /// transactions still occupy a block but change no value.
    pub fn commit_block(
        &self,
        tx_id: &TransactionId,
        rw_set: &ReadWriteSet,
        endorsed: bool,
    ) -> CommittedBlock {
        let mut inner = self.inner.write();
        inner.height += 1;
        let number = inner.height;

        let code = if inner.seen.contains(tx_id) {
            ValidationCode::DuplicateTxId
        } else if !endorsed {
            ValidationCode::EndorsementPolicyFailure
        } else if rw_set.reads.iter().any(|read| is_stale(&inner.entries, read)) {
            ValidationCode::MvccReadConflict
        } else {
            ValidationCode::Valid
        };

        if code != ValidationCode::DuplicateTxId {
            inner.seen.insert(tx_id.clone());
        }
        if code.is_valid() {
            for write in &rw_set.writes {
                inner.entries.insert(
                    write.key.clone(),
                    VersionedValue {
                        value: write.value.clone(),
                        version: number,
                    },
                );
            }
        }

        debug!(tx_id = %tx_id.short(), block = number, code = %code, "Block committed");
        CommittedBlock { number, code }
    }
}

fn is_stale(entries: &HashMap<String, VersionedValue>, read: &KvRead) -> bool {
    entries.get(&read.key).map(|v| v.version) != read.version
}
