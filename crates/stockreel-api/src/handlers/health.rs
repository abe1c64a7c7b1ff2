//! Health check handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use stockreel_models::Provider;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    /// Providers with credentials
    pub providers: Vec<Provider>,
}

/// Readiness check endpoint (readiness probe).
///
/// Without provider keys every request is served from the fallback pool,
/// so the service is still up but reports `degraded`.
pub async fn ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let providers = state.pipeline.configured_providers();

    Json(ReadinessResponse {
        status: if providers.is_empty() { "degraded" } else { "ready" }.to_string(),
        providers,
    })
}
