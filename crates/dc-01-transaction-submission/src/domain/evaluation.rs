//! Endorsement evaluation.
//!
//! Decides whether the collected replies are good enough to order.

use crate::config::EndorsementPolicy;
use crate::domain::errors::SubmissionError;
use crate::domain::message::extract_message;
use shared_types::{PeerReply, ProposalResponse};

/// Replies accepted for ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Endorsed {
    /// The first reply. Its status, message and payload are reported to the caller.
    pub first: ProposalResponse,
    /// Every successful response, in target order, `first` included.
    pub responses: Vec<ProposalResponse>,
}

/// Judge `replies` under `policy`.
pub fn evaluate(
    replies: &[PeerReply],
    policy: EndorsementPolicy,
) -> Result<Endorsed, SubmissionError> {
    let first_reply = replies.first().ok_or_else(|| rejected("No proposal responses received"))?;
    let first = match first_reply.as_response() {
        Some(response) if response.is_success() => response.clone(),
        _ => return Err(rejected(rejection_message(first_reply))),
    };

    if policy == EndorsementPolicy::AllMustAgree {
        if let Some(bad) = replies.iter().find(|reply| !reply.is_success()) {
            return Err(rejected(rejection_message(bad)));
        }
        let diverging = replies
            .iter()
            .filter_map(PeerReply::as_response)
            .any(|response| response.payload != first.payload);
        if diverging {
            return Err(rejected("Endorsement responses do not match"));
        }
    }

    let responses = replies
        .iter()
        .filter_map(PeerReply::as_response)
        .filter(|response| response.is_success())
        .cloned()
        .collect();

    Ok(Endorsed { first, responses })
}

/// Human-readable reason a reply was not accepted.
pub fn rejection_message(reply: &PeerReply) -> String {
    match reply {
        PeerReply::Response(response) if !response.message.is_empty() => response.message.clone(),
        PeerReply::Response(response) => {
            format!("Peer {} returned status {}", response.peer, response.status)
        }
        PeerReply::Error { message, .. } => extract_message(message),
    }
}

fn rejected(message: impl Into<String>) -> SubmissionError {
    SubmissionError::ProposalRejected {
        message: message.into(),
    }
}
