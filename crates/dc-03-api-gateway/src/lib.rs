//! DC-03 API Gateway - REST interface to the digital-contracts chaincode.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (dc-03)                   │
//! ├──────────────────────────────────────────────────────────┤
//! │   HTTP :8081                                             │
//! │      │                                                   │
//! │   CORS → Tracing (api_request span) → Timeout → Limit    │
//! │      │                                                   │
//! │   POST /addContract ──→ TransactionSubmissionApi::invoke │
//! │   GET  /contracts/:key → TransactionSubmissionApi::query │
//! │   GET  /health, /stats                                   │
//! └──────┼───────────────────────────────────────────────────┘
//!        ▼
//!   dc-01 coordinator ──→ peers / orderer / commit events
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use dc_03_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let mut gateway = ApiGatewayService::new(GatewayConfig::default(), api)?
//!     .with_events(hub);
//! let addr = gateway.start().await?;
//! // ...
//! gateway.shutdown().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod rest;
pub mod service;

pub use domain::config::{humantime_serde, ConfigError, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::types::{AddContractRequest, ContractResponse, InvokeResponse};
pub use middleware::{GatewayMetrics, MetricsSnapshot};
pub use rest::{router, AppState};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
