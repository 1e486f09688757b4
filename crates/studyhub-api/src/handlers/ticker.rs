//! Demo ticker handlers.

use axum::extract::State;
use axum::response::IntoResponse;

use studyhub_realtime::event::ticker::ticks_topic;
use studyhub_realtime::stream_frames;

use crate::error::ApiError;
use crate::extractors::Caller;
use crate::sse::sse_response;
use crate::state::AppState;

/// GET /api/demo/ticks/events — long-lived SSE stream of demo ticks.
pub async fn subscribe_ticks(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state.ticker.subscribe(caller.identity(), vec![ticks_topic()])?;
    let frames = stream_frames(subscription, state.ticker.keepalive_interval());
    Ok(sse_response(frames))
}
