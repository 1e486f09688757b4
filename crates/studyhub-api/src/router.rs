//! Route definitions for the StudyHub realtime API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(chat_routes())
        .merge(announcement_routes())
        .merge(ticker_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Chat: room streams, message publish, control frames.
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chat/rooms/{room_id}/events",
            get(handlers::chat::subscribe_room),
        )
        .route(
            "/chat/rooms/{room_id}/messages",
            post(handlers::chat::post_message),
        )
        .route(
            "/chat/rooms/{room_id}/typing",
            post(handlers::chat::post_typing),
        )
        .route(
            "/chat/connections/{connection_id}/commands",
            post(handlers::chat::post_command),
        )
}

/// Announcements: feed stream and publish.
fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/announcements/events",
            get(handlers::announcement::subscribe_feed),
        )
        .route(
            "/announcements",
            post(handlers::announcement::post_announcement),
        )
}

/// Demo ticker stream.
fn ticker_routes() -> Router<AppState> {
    Router::new().route("/demo/ticks/events", get(handlers::ticker::subscribe_ticks))
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
