use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::services::metrics;
use crate::startup::AppState;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "quiz-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the generation provider must be reachable.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let provider = state.generator.provider();
    provider.health_check().await.map_err(|e| {
        tracing::warn!(provider = provider.name(), error = %e, "Provider health check failed");
        AppError::ServiceUnavailable(e.to_string())
    })?;
    Ok(StatusCode::OK)
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    metrics::get_metrics()
}
