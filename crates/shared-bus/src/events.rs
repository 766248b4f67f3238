//! # Commit Events
//!
//! Notifications emitted when a transaction has been validated and written
//! to the ledger (or rejected by validation).

use serde::{Deserialize, Serialize};
use shared_types::{PeerEndpoint, TransactionId, ValidationCode};

/// A transaction reached a block and was validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEvent {
    /// Transaction this notification is about.
    pub tx_id: TransactionId,
    /// Validation result.
    pub code: ValidationCode,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Peer that committed the block.
    pub peer: PeerEndpoint,
}

impl CommitEvent {
    pub fn new(
        tx_id: TransactionId,
        code: ValidationCode,
        block_number: u64,
        peer: PeerEndpoint,
    ) -> Self {
        Self {
            tx_id,
            code,
            block_number,
            peer,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.code.is_valid()
    }
}

/// Filter for monitoring subscriptions.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Transactions to include. Empty means all transactions.
    pub tx_ids: Vec<TransactionId>,
    /// Only deliver events whose code is not `VALID`.
    pub invalid_only: bool,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific transactions.
    #[must_use]
    pub fn transactions(tx_ids: Vec<TransactionId>) -> Self {
        Self {
            tx_ids,
            invalid_only: false,
        }
    }

    /// Create a filter for rejected transactions only.
    #[must_use]
    pub fn invalid_only() -> Self {
        Self {
            tx_ids: Vec::new(),
            invalid_only: true,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &CommitEvent) -> bool {
        if self.invalid_only && event.is_valid() {
            return false;
        }
        self.tx_ids.is_empty() || self.tx_ids.contains(&event.tx_id)
    }
}
