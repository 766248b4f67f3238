//! Submission state machine.
//!
//! Each invocation walks these states once, in order. Terminal states
//! accept no further transitions.

use shared_types::{CommitOutcome, TransactionId};
use std::fmt;
use tracing::debug;

/// Phase of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Signed proposal sent to endorsing peers.
    Proposing,
    /// Collected replies being judged.
    Evaluating,
    /// Listener registered, envelope being broadcast.
    Ordering,
    /// Waiting for acknowledgment and commit event.
    AwaitingCommit,
    /// Endorsement failed; ordering never started.
    Rejected,
    /// Ordering was reached and a commit outcome is known.
    Completed(CommitOutcome),
    /// Ordering or transport failed before an outcome was known.
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Rejected | SubmissionState::Completed(_) | SubmissionState::Failed
        )
    }

    /// Whether moving from `self` to `next` follows the workflow.
    pub fn can_transition_to(&self, next: &SubmissionState) -> bool {
        use SubmissionState::*;
        match (self, next) {
            (Proposing, Evaluating) | (Proposing, Failed) => true,
            (Evaluating, Ordering) | (Evaluating, Rejected) => true,
            (Ordering, AwaitingCommit) | (Ordering, Failed) => true,
            (AwaitingCommit, Completed(_)) | (AwaitingCommit, Failed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Proposing => f.write_str("proposing"),
            SubmissionState::Evaluating => f.write_str("evaluating"),
            SubmissionState::Ordering => f.write_str("ordering"),
            SubmissionState::AwaitingCommit => f.write_str("awaiting_commit"),
            SubmissionState::Rejected => f.write_str("rejected"),
            SubmissionState::Completed(outcome) => write!(f, "completed({outcome})"),
            SubmissionState::Failed => f.write_str("failed"),
        }
    }
}

/// Tracks the state of one invocation and logs each transition.
#[derive(Debug)]
pub struct SubmissionTracker {
    tx_id: TransactionId,
    state: SubmissionState,
    history: Vec<SubmissionState>,
}

impl SubmissionTracker {
    pub fn new(tx_id: TransactionId) -> Self {
        Self {
            tx_id,
            state: SubmissionState::Proposing,
            history: vec![SubmissionState::Proposing],
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// States visited so far, including the current one.
    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }

    /// Move to `next`. Out-of-order transitions are ignored and return `false`.
    pub fn advance(&mut self, next: SubmissionState) -> bool {
        if !self.state.can_transition_to(&next) {
            debug!(
                tx_id = %self.tx_id.short(),
                from = %self.state,
                to = %next,
                "Ignoring out-of-order submission transition"
            );
            return false;
        }
        debug!(tx_id = %self.tx_id.short(), from = %self.state, to = %next, "Submission state");
        self.history.push(next.clone());
        self.state = next;
        true
    }
}
