//! # Commit Outcomes
//!
//! Validation codes reported by committing peers and the terminal outcome
//! of a submitted transaction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation result a committing peer attaches to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ValidationCode {
    Valid,
    MvccReadConflict,
    DuplicateTxId,
    EndorsementPolicyFailure,
    BadPayload,
    BadProposalTxId,
    /// Any code this workspace does not model explicitly.
    Other(String),
}

impl ValidationCode {
    pub fn as_str(&self) -> &str {
        match self {
            ValidationCode::Valid => "VALID",
            ValidationCode::MvccReadConflict => "MVCC_READ_CONFLICT",
            ValidationCode::DuplicateTxId => "DUPLICATE_TXID",
            ValidationCode::EndorsementPolicyFailure => "ENDORSEMENT_POLICY_FAILURE",
            ValidationCode::BadPayload => "BAD_PAYLOAD",
            ValidationCode::BadProposalTxId => "BAD_PROPOSAL_TXID",
            ValidationCode::Other(code) => code,
        }
    }

    pub fn parse(code: &str) -> Self {
        match code {
            "VALID" => ValidationCode::Valid,
            "MVCC_READ_CONFLICT" => ValidationCode::MvccReadConflict,
            "DUPLICATE_TXID" => ValidationCode::DuplicateTxId,
            "ENDORSEMENT_POLICY_FAILURE" => ValidationCode::EndorsementPolicyFailure,
            "BAD_PAYLOAD" => ValidationCode::BadPayload,
            "BAD_PROPOSAL_TXID" => ValidationCode::BadProposalTxId,
            other => ValidationCode::Other(other.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationCode::Valid)
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ValidationCode> for String {
    fn from(code: ValidationCode) -> Self {
        code.as_str().to_string()
    }
}

impl From<String> for ValidationCode {
    fn from(code: String) -> Self {
        ValidationCode::parse(&code)
    }
}

/// Terminal outcome of a transaction that reached the ordering step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitOutcome {
    Valid,
    Invalid(ValidationCode),
    Timeout,
}

impl CommitOutcome {
    pub fn from_code(code: ValidationCode) -> Self {
        if code.is_valid() {
            CommitOutcome::Valid
        } else {
            CommitOutcome::Invalid(code)
        }
    }
}

impl fmt::Display for CommitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitOutcome::Valid => f.write_str("VALID"),
            CommitOutcome::Invalid(code) => write!(f, "INVALID({code})"),
            CommitOutcome::Timeout => f.write_str("TIMEOUT"),
        }
    }
}
