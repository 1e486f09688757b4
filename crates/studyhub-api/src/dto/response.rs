//! Response payloads.

use serde::Serialize;
use uuid::Uuid;

/// Returned by publish endpoints.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    /// Identifier assigned to the published entity.
    pub id: Uuid,
    /// Number of live mailboxes the event was queued into.
    pub delivered: usize,
}

/// Returned by fire-and-forget publish endpoints with no entity id.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    /// Number of live mailboxes the event was queued into.
    pub delivered: usize,
}

/// Returned by the control-frame endpoint.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Command kind that was applied.
    pub applied: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Per-hub statistics in the detailed health body.
#[derive(Debug, Serialize)]
pub struct HubStats {
    /// Live connections.
    pub connections: usize,
    /// Live (non-empty) topics.
    pub topics: usize,
}

/// Body of `GET /api/health/detailed`.
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    /// Service status.
    pub status: String,
    /// Chat hub statistics.
    pub chat: HubStats,
    /// Announcement hub statistics.
    pub announcements: HubStats,
    /// Ticker hub statistics.
    pub ticker: HubStats,
}
