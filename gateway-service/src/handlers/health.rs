use crate::dtos::HealthResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};
use chrono::Utc;

/// Liveness probe: process uptime plus a wall-clock timestamp.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
