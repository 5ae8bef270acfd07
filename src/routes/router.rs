use crate::config::CorsConfig;
use crate::cors::build_cors_layer;
use crate::error::AppResult;
use crate::middleware::request_id_middleware;
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::health;
use super::info;
use super::AppState;

/// Create application router
///
/// Every route, including the fallback, sits behind the CORS layer, so
/// preflight requests are answered before any handler runs.
pub fn create_router(state: Arc<AppState>, cors_config: &CorsConfig) -> AppResult<axum::Router> {
    let cors = build_cors_layer(cors_config)?;

    let router = axum::Router::new()
        .route("/", get(info::service_info))
        .route("/health", get(health::health_check))
        .fallback(info::not_found)
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
