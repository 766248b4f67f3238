use super::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared_bus::EventPublisher;

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "dc-api-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}

/// Request counters, submission outcomes and commit listener statistics.
pub(super) async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let events = state.events.as_ref().map(|hub| {
        json!({
            "active_listeners": hub.listener_count(),
            "published": hub.events_published(),
            "listeners": hub.stats(),
        })
    });

    Json(json!({
        "requests": state.metrics.snapshot(),
        "submissions": state.api.stats(),
        "commit_events": events,
    }))
}
