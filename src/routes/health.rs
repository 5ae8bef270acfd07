use crate::error::AppResult;
use crate::routes::types::HealthCheckResponse;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use super::AppState;

/// Health check endpoint
///
/// `database` is always `not_configured`; the dashboard shows the field but
/// this service keeps no storage.
pub async fn health_check(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        database: "not_configured".to_string(),
        timestamp: chrono::Utc::now(),
        uptime_seconds: state.uptime_seconds(),
    };

    Ok(Json(response))
}
