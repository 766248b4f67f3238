//! REST surface.
//!
//! | Method | Path               | Chaincode call                 |
//! |--------|--------------------|--------------------------------|
//! | POST   | `/addContract`     | `addContract(key, value)`      |
//! | GET    | `/contracts/:key`  | `getContract(key)` (query)     |
//! | GET    | `/health`          |                                |
//! | GET    | `/stats`           |                                |

mod contracts;
mod status;

use crate::domain::config::GatewayConfig;
use crate::middleware::{create_cors_layer, GatewayMetrics, TracingLayer};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use dc_01_transaction_submission::TransactionSubmissionApi;
use shared_bus::CommitEventHub;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn TransactionSubmissionApi>,
    pub metrics: Arc<GatewayMetrics>,
    /// Commit event hub, reported on `/stats` when the gateway owns one.
    pub events: Option<CommitEventHub>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(api: Arc<dyn TransactionSubmissionApi>) -> Self {
        Self {
            api,
            metrics: Arc::new(GatewayMetrics::new()),
            events: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_events(mut self, hub: CommitEventHub) -> Self {
        self.events = Some(hub);
        self
    }
}

/// Build the HTTP router with its middleware stack.
pub fn router(state: AppState, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new())
        .layer(TimeoutLayer::new(config.timeouts.request));

    Router::new()
        .route("/addContract", post(contracts::add_contract))
        .route("/contracts/:key", get(contracts::get_contract))
        .route("/health", get(status::health))
        .route("/stats", get(status::stats))
        .layer(DefaultBodyLimit::max(config.limits.max_request_size))
        .layer(middleware)
        .with_state(state)
}
