//! Announcement feed handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use studyhub_core::error::AppError;
use studyhub_realtime::event::announcement::{AnnouncementEvent, course_topic};
use studyhub_realtime::stream_frames;

use crate::dto::request::{AnnouncementFeedQuery, PostAnnouncementRequest};
use crate::dto::response::PublishResponse;
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::sse::sse_response;
use crate::state::AppState;

/// GET /api/announcements/events?course_id= — long-lived SSE stream.
///
/// Course-scoped subscribers also receive platform-wide broadcasts,
/// which target every connection on the hub.
pub async fn subscribe_feed(
    State(state): State<AppState>,
    Query(query): Query<AnnouncementFeedQuery>,
    caller: Caller,
) -> Result<impl IntoResponse, ApiError> {
    let topics = query.course_id.map(course_topic).into_iter().collect();
    let subscription = state.announcements.subscribe(caller.identity(), topics)?;
    let frames = stream_frames(subscription, state.announcements.keepalive_interval());
    Ok(sse_response(frames))
}

/// POST /api/announcements — publish an announcement event.
pub async fn post_announcement(
    State(state): State<AppState>,
    _caller: Caller,
    Json(request): Json<PostAnnouncementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("announcement title is empty").into());
    }

    let announcement_id = Uuid::new_v4();
    let delivered = state
        .announcements
        .publish(&AnnouncementEvent::AnnouncementPosted {
            announcement_id,
            course_id: request.course_id,
            title: request.title,
            body: request.body,
            posted_at: Utc::now(),
        });

    Ok((
        StatusCode::ACCEPTED,
        Json(PublishResponse {
            id: announcement_id,
            delivered,
        }),
    ))
}
