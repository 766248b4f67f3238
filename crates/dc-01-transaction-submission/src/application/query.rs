//! Read-only query path.
//!
//! Same signed proposal as a submission, without ordering or commit wait.

use crate::application::proposal::{collect_replies, sign_proposal};
use crate::application::session::NetworkSession;
use crate::domain::errors::QueryError;
use shared_types::{PeerEndpoint, PeerReply, TransactionId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Successful query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub tx_id: TransactionId,
    /// Peer whose response is reported.
    pub peer: PeerEndpoint,
    pub payload: Vec<u8>,
    /// Every reply, in target order.
    pub replies: Vec<PeerReply>,
}

impl QueryResult {
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }
}

/// Runs read-only proposals against the session's peers.
pub struct QueryRunner {
    session: Arc<NetworkSession>,
    proposal_timeout: Duration,
}

impl QueryRunner {
    pub fn new(session: Arc<NetworkSession>, proposal_timeout: Duration) -> Self {
        Self {
            session,
            proposal_timeout,
        }
    }

    /// Evaluate `function(args)` and return the first successful response.
    ///
    /// No retries. When nothing succeeded, the first reply's failure is
    /// returned as is.
    pub async fn query(&self, function: &str, args: Vec<String>) -> Result<QueryResult, QueryError> {
        let request = self.session.new_request(function, args);
        if request.endorsing_targets().is_empty() {
            return Err(QueryError::NoTargets);
        }
        debug!(tx_id = %request.tx_id().short(), function, "Sending query proposal");

        let signed = sign_proposal(&self.session, &request)?;
        let replies =
            collect_replies(&self.session, &request, &signed, self.proposal_timeout).await;

        if let Some(response) = replies
            .iter()
            .filter_map(PeerReply::as_response)
            .find(|response| response.is_success())
        {
            info!(
                function,
                peer = %response.peer,
                replies = replies.len(),
                "Query has completed"
            );
            return Ok(QueryResult {
                tx_id: request.tx_id().clone(),
                peer: response.peer.clone(),
                payload: response.payload.clone(),
                replies: replies.clone(),
            });
        }

        let error = match replies.into_iter().next() {
            Some(PeerReply::Error { peer, message }) => QueryError::Peer {
                endpoint: peer,
                message,
            },
            Some(PeerReply::Response(response)) => QueryError::Chaincode {
                status: response.status,
                message: response.message,
            },
            None => QueryError::NoTargets,
        };
        warn!(function, error = %error, "Query failed");
        Err(error)
    }
}
