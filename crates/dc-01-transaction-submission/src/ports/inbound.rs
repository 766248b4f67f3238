//! Inbound Ports (Driving Ports / API)

use crate::application::coordinator::{SubmissionStatsSnapshot, SubmitReceipt};
use crate::application::query::QueryResult;
use crate::domain::errors::{QueryError, SubmissionError};
use async_trait::async_trait;
use shared_types::InvocationRequest;

/// Primary Transaction Submission API
#[async_trait]
pub trait TransactionSubmissionApi: Send + Sync {
    /// Build a fresh request for `function(args)` and submit it.
    ///
    /// Every call mints a new transaction id.
    async fn invoke(
        &self,
        function: &str,
        args: Vec<String>,
    ) -> Result<SubmitReceipt, SubmissionError>;

    /// Run an already-built request through proposal, ordering and commit.
    async fn submit(&self, request: InvocationRequest) -> Result<SubmitReceipt, SubmissionError>;

    /// Evaluate `function(args)` read-only on the endorsing peers.
    async fn query(&self, function: &str, args: Vec<String>) -> Result<QueryResult, QueryError>;

    /// Counters over every submission so far.
    fn stats(&self) -> SubmissionStatsSnapshot;
}
