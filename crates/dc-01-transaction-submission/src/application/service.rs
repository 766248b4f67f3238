//! Transaction Submission Service
//!
//! Main service implementing `TransactionSubmissionApi`.

use crate::application::coordinator::{SubmissionStatsSnapshot, SubmitReceipt, TransactionCoordinator};
use crate::application::query::{QueryResult, QueryRunner};
use crate::application::session::NetworkSession;
use crate::config::{ConfigError, SubmissionConfig};
use crate::domain::errors::{QueryError, SubmissionError};
use crate::ports::inbound::TransactionSubmissionApi;
use async_trait::async_trait;
use shared_types::InvocationRequest;
use std::sync::Arc;

/// Coordinator and query runner over one shared session.
pub struct SubmissionService {
    coordinator: TransactionCoordinator,
    queries: QueryRunner,
}

impl SubmissionService {
    pub fn new(session: Arc<NetworkSession>, config: SubmissionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let queries = QueryRunner::new(session.clone(), config.proposal_timeout);
        Ok(Self {
            coordinator: TransactionCoordinator::new(session, config),
            queries,
        })
    }

    pub fn session(&self) -> &Arc<NetworkSession> {
        self.coordinator.session()
    }

}

#[async_trait]
impl TransactionSubmissionApi for SubmissionService {
    async fn invoke(
        &self,
        function: &str,
        args: Vec<String>,
    ) -> Result<SubmitReceipt, SubmissionError> {
        let request = self.session().new_request(function, args);
        self.coordinator.submit(request).await
    }

    async fn submit(&self, request: InvocationRequest) -> Result<SubmitReceipt, SubmissionError> {
        self.coordinator.submit(request).await
    }

    async fn query(&self, function: &str, args: Vec<String>) -> Result<QueryResult, QueryError> {
        self.queries.query(function, args).await
    }

    fn stats(&self) -> SubmissionStatsSnapshot {
        self.coordinator.stats()
    }
}
