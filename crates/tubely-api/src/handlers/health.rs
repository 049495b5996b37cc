use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub storage_backend: String,
    pub version: String,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        storage_backend: state.storage.backend_type().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
