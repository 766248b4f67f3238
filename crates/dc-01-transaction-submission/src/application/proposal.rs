//! Proposal fan-out shared by the submit and query paths.

use crate::application::session::NetworkSession;
use futures::future::join_all;
use shared_types::{InvocationRequest, NetworkError, PeerReply, SignedProposal};
use std::time::Duration;
use tracing::{debug, warn};

/// Build and sign the proposal for `request` with the session identity.
pub(crate) fn sign_proposal(
    session: &NetworkSession,
    request: &InvocationRequest,
) -> Result<SignedProposal, NetworkError> {
    let proposal = request.to_proposal(session.creator());
    let signature = session.signer().sign(&proposal.signing_bytes())?;
    Ok(SignedProposal {
        proposal,
        signature,
    })
}

/// Send `proposal` to every target in parallel and collect one reply per
/// target, in target order.
///
/// A peer that errors, is unknown to the session, or misses `timeout`
/// fills its slot with `PeerReply::Error`.
pub(crate) async fn collect_replies(
    session: &NetworkSession,
    request: &InvocationRequest,
    proposal: &SignedProposal,
    timeout: Duration,
) -> Vec<PeerReply> {
    let calls = request.endorsing_targets().iter().map(|target| async move {
        let Some(peer) = session.peer(target) else {
            warn!(peer = %target, "No connection for endorsing target");
            return PeerReply::Error {
                peer: target.clone(),
                message: format!("No connection configured for {target}"),
            };
        };

        match tokio::time::timeout(timeout, peer.process_proposal(proposal)).await {
            Ok(Ok(response)) => {
                debug!(
                    peer = %target,
                    status = response.status,
                    "Proposal response received"
                );
                PeerReply::Response(response)
            }
            Ok(Err(e)) => {
                warn!(peer = %target, error = %e, "Proposal failed");
                PeerReply::Error {
                    peer: target.clone(),
                    message: e.to_string(),
                }
            }
            Err(_) => {
                let e = NetworkError::Timeout {
                    endpoint: target.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                };
                warn!(peer = %target, error = %e, "Proposal timed out");
                PeerReply::Error {
                    peer: target.clone(),
                    message: e.to_string(),
                }
            }
        }
    });

    join_all(calls).await
}
