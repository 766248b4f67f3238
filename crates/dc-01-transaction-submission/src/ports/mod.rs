//! Ports module for Transaction Submission
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::TransactionSubmissionApi;
pub use outbound::{CommitEventSource, EndorsingPeer, OrderingService, ProposalSigner};
