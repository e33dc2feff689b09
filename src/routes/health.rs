use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Health check endpoint
///
/// Reports the currently served record count and where those records came
/// from. Never fails; an unreachable upstream just shows as `fallback`.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let set = state.cache.records(false).await;
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(json!({
        "status": "ok",
        "service": "permit-office",
        "recordCount": set.records.len(),
        "provenance": set.provenance.as_str(),
        "uptime_seconds": uptime,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
