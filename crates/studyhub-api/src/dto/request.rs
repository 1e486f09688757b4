//! Request payloads.

use serde::Deserialize;
use uuid::Uuid;

/// Body of `POST /api/chat/rooms/{room_id}/messages`.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    /// Message body.
    pub body: String,
}

/// Body of `POST /api/announcements`.
#[derive(Debug, Deserialize)]
pub struct PostAnnouncementRequest {
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Scoping course; omit for a platform-wide broadcast.
    pub course_id: Option<Uuid>,
}

/// Query of `GET /api/announcements/events`.
#[derive(Debug, Default, Deserialize)]
pub struct AnnouncementFeedQuery {
    /// Restrict the feed to one course's topic.
    pub course_id: Option<Uuid>,
}
