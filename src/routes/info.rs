use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::routes::types::ServiceInfoResponse;
use axum::extract::{OriginalUri, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use super::AppState;

/// Service name and version, plus the CORS policy browsers are held to
pub async fn service_info(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<impl IntoResponse> {
    let response = ServiceInfoResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        request_id: request_id.as_str().to_string(),
        cors: state.cors.clone(),
    };

    Ok(Json(response))
}

/// Fallback for unknown paths
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
