//! Liveness endpoint used by the dashboard and load balancer

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub environment: String,
}

/// Report liveness and whether storage answers a ping. Responds 503 when the
/// database is unreachable so purchases are not attempted.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, database) = if state.store.ping().await {
        (StatusCode::OK, "healthy", "connected")
    } else {
        tracing::warn!("Health check could not reach the database");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "disconnected")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            environment: state.config.environment.clone(),
        }),
    )
}
