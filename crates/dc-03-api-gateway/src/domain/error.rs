//! HTTP error mapping.
//!
//! | Failure                              | Status |
//! |--------------------------------------|--------|
//! | malformed body / parameters          | 400    |
//! | proposal rejected, chaincode error   | 422    |
//! | commit invalidated                   | 409    |
//! | ordering failed, transport error     | 502    |
//! | no query targets                     | 503    |
//! | commit timeout                       | 504    |
//!
//! Every error body is `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dc_01_transaction_submission::{QueryError, SubmissionError};
use std::fmt;

/// Error returned by a REST handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        let message = e.client_message();
        match e {
            SubmissionError::ProposalRejected { .. } => ApiError::rejected(message),
            SubmissionError::CommitInvalid(_) => ApiError::conflict(message),
            SubmissionError::CommitTimeout { .. } => ApiError::gateway_timeout(message),
            SubmissionError::OrderingFailed { .. } | SubmissionError::Transport(_) => {
                ApiError::bad_gateway(message)
            }
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Chaincode { message, .. } => ApiError::rejected(message),
            QueryError::NoTargets => ApiError::unavailable(e.to_string()),
            QueryError::Peer { .. } | QueryError::Transport(_) => ApiError::bad_gateway(e.to_string()),
        }
    }
}

/// Result type for REST handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("server bind error: {0}")]
    Bind(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("gateway already started")]
    AlreadyStarted,
}
