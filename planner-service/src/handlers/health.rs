use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::startup::AppState;

/// Liveness probe. Doesn't touch the model provider.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "planner-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the model provider must accept our credentials.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.planner.provider().health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Model provider not ready");
        AppError::ServiceUnavailable
    })?;

    Ok(StatusCode::OK)
}
