use crate::config::CorsConfig;
use chrono::{DateTime, Utc};

/// Application state shared across all HTTP handlers.
///
/// This struct is wrapped in `Arc` and shared across all request handlers
/// via Axum's State extraction.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Effective CORS policy, reported by the service info endpoint
    pub cors: CorsConfig,

    /// When the server started, for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(cors: CorsConfig) -> Self {
        Self {
            cors,
            started_at: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}
