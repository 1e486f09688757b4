//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DetailedHealthResponse, HealthResponse, HubStats};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    Json(DetailedHealthResponse {
        status: "ok".to_string(),
        chat: HubStats {
            connections: state.chat.connection_count(),
            topics: state.chat.topic_count(),
        },
        announcements: HubStats {
            connections: state.announcements.connection_count(),
            topics: state.announcements.topic_count(),
        },
        ticker: HubStats {
            connections: state.ticker.connection_count(),
            topics: state.ticker.topic_count(),
        },
    })
}
