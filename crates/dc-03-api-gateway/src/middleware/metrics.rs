//! Request counters exposed on `/stats`.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Kind of work a request triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Ordered transaction (`POST /addContract`).
    Invoke,
    /// Read-only query (`GET /contracts/{key}`).
    Query,
}

#[derive(Debug, Default)]
pub struct GatewayMetrics {
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,
    pub invocations: AtomicU64,
    pub queries: AtomicU64,
    pub total_latency_ms: AtomicU64,
}

/// Point-in-time copy of [`GatewayMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub success: u64,
    pub error: u64,
    pub invocations: u64,
    pub queries: u64,
    pub average_latency_ms: f64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, kind: RequestKind, success: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }
        match kind {
            RequestKind::Invoke => self.invocations.fetch_add(1, Ordering::Relaxed),
            RequestKind::Query => self.queries.fetch_add(1, Ordering::Relaxed),
        };
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total: self.requests_total.load(Ordering::Relaxed),
            success: self.requests_success.load(Ordering::Relaxed),
            error: self.requests_error.load(Ordering::Relaxed),
            invocations: self.invocations.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            average_latency_ms: self.average_latency_ms(),
        }
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    kind: RequestKind,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, kind: RequestKind) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            kind,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.metrics.record_request(self.kind, success, latency_ms);
    }
}
