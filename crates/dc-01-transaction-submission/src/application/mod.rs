//! Application layer: the submission workflow and its collaborators.

pub mod coordinator;
mod proposal;
pub mod query;
pub mod service;
pub mod session;

pub use coordinator::{SubmissionStatsSnapshot, SubmitReceipt, TransactionCoordinator};
pub use query::{QueryResult, QueryRunner};
pub use service::SubmissionService;
pub use session::{NetworkSession, NetworkSessionBuilder};
