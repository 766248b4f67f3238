//! # DC-01: Transaction Submission Subsystem
//!
//! Drives one chaincode invocation from proposal to commit confirmation.
//!
//! ## Workflow
//!
//! ```text
//! Proposing ──→ Evaluating ──→ Ordering ──→ AwaitingCommit ──→ Completed
//!                   │                             │
//!                   └──→ Rejected                 ├── VALID event + ack
//!                        (no ordering,            ├── other code  → CommitInvalid
//!                         no listener)            └── deadline    → CommitTimeout
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: submission state machine, endorsement evaluation, errors,
//!   peer message extraction
//! - **Ports**: Inbound (`TransactionSubmissionApi`) and Outbound
//!   (`EndorsingPeer`, `OrderingService`, `CommitEventSource`, `ProposalSigner`)
//! - **Application**: coordinator, query path, network session, service
//! - **Adapters**: commit event hub binding, ECDSA signer, MSP credentials

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{load_msp_directory, verify_signature, EcdsaSigner, MspCredentials};
pub use application::coordinator::{SubmissionStatsSnapshot, SubmitReceipt, TransactionCoordinator};
pub use application::query::{QueryResult, QueryRunner};
pub use application::service::SubmissionService;
pub use application::session::{NetworkSession, NetworkSessionBuilder};
pub use config::{
    ConfigError, EndorsementPolicy, SubmissionConfig, DEFAULT_COMMIT_TIMEOUT,
    DEFAULT_PROPOSAL_TIMEOUT,
};
pub use domain::errors::{CredentialError, QueryError, SessionError, SubmissionError};
pub use domain::state::SubmissionState;
pub use ports::inbound::TransactionSubmissionApi;
pub use ports::outbound::{CommitEventSource, EndorsingPeer, OrderingService, ProposalSigner};
