//! Health check handlers

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /health");

    let uptime_seconds = (chrono::Utc::now() - state.started_at).num_seconds().max(0);

    Json(serde_json::json!({
        "status": "healthy",
        "app": state.app_name,
        "version": state.version,
        "timestamp": chrono::Utc::now().timestamp(),
        "uptime_seconds": uptime_seconds,
        "users": state.users.len(),
    }))
}

pub async fn handle_liveness() -> impl IntoResponse {
    info!("GET /live");

    Json(serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now().timestamp()
    }))
}
