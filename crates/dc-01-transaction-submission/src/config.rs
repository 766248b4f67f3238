//! Configuration for the Transaction Submission Subsystem

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default wait for the commit event after ordering starts.
pub const DEFAULT_COMMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default wait for each endorsing peer.
pub const DEFAULT_PROPOSAL_TIMEOUT: Duration = Duration::from_secs(30);

/// How collected proposal responses are judged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndorsementPolicy {
    /// The first reply decides: it must be a response with status 200.
    #[default]
    FirstResponse,
    /// Every reply must be a 200 response and all payloads must match.
    AllMustAgree,
}

/// Submission configuration.
#[derive(Clone, Debug)]
pub struct SubmissionConfig {
    /// Deadline for the commit event, measured from the start of ordering.
    pub commit_timeout: Duration,
    /// Deadline for each endorsing peer's proposal response.
    pub proposal_timeout: Duration,
    /// Endorsement evaluation rule.
    pub endorsement_policy: EndorsementPolicy,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            commit_timeout: DEFAULT_COMMIT_TIMEOUT,
            proposal_timeout: DEFAULT_PROPOSAL_TIMEOUT,
            endorsement_policy: EndorsementPolicy::default(),
        }
    }
}

impl SubmissionConfig {
    /// Reject zero deadlines.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.commit_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("commit_timeout"));
        }
        if self.proposal_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("proposal_timeout"));
        }
        Ok(())
    }

    pub fn with_commit_timeout(mut self, timeout: Duration) -> Self {
        self.commit_timeout = timeout;
        self
    }

    pub fn with_proposal_timeout(mut self, timeout: Duration) -> Self {
        self.proposal_timeout = timeout;
        self
    }

    pub fn with_policy(mut self, policy: EndorsementPolicy) -> Self {
        self.endorsement_policy = policy;
        self
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}
