//! Liveness and diagnostics handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    discord: bool,
    uptime_seconds: u64,
    version: &'static str,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server running",
        discord: state.health.discord_connected(),
        uptime_seconds: state.health.uptime().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /livez
pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
