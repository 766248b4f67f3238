//! Middleware stack for the API Gateway.
//!
//! Layer order (outermost first): CORS → Tracing → Timeout → BodyLimit → Handler

pub mod cors;
pub mod metrics;
pub mod tracing;

pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, MetricsSnapshot, RequestKind, RequestTimer};
pub use tracing::{TracingLayer, REQUEST_ID_HEADER};
