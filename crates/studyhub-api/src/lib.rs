//! # studyhub-api
//!
//! HTTP API layer for StudyHub realtime feeds built on Axum.
//!
//! Provides the SSE subscribe endpoints, the in-process publish
//! endpoints used by feature services, extractors, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
