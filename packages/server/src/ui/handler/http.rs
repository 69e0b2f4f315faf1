//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use tandem_shared::time::{get_timestamp_millis, timestamp_to_rfc3339};

use crate::{
    infrastructure::dto::http::{DebugResponse, HealthResponse, StatusResponse},
    ui::state::AppState,
};

/// Stats snapshot for this worker instance
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let stats = state.get_stats_usecase.execute().await;
    Json(stats.into())
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.get_stats_usecase.execute().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: timestamp_to_rfc3339(get_timestamp_millis()),
        uptime_seconds: stats.uptime_seconds,
    })
}

/// Dumps the queue, sessions and participants (also written to the log)
pub async fn debug_state(State(state): State<Arc<AppState>>) -> Json<DebugResponse> {
    let debug_state = state.get_debug_state_usecase.execute().await;
    Json(debug_state.into())
}
