//! Maps hub stream frames onto `axum` Server-Sent Events responses.
//!
//! Keepalive is handled by the hub's own stream adapter (it is part of
//! the frame protocol and covered by its tests), so axum's built-in
//! `KeepAlive` layer is deliberately not attached.

use std::convert::Infallible;

use axum::response::sse::{Event, Sse};
use futures::stream::{Stream, StreamExt};

use studyhub_realtime::StreamFrame;

/// Wraps a frame stream into an SSE response.
pub fn sse_response(
    frames: impl Stream<Item = StreamFrame> + Send + 'static,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(frames.map(|frame| Ok(into_sse_event(frame))))
}

fn into_sse_event(frame: StreamFrame) -> Event {
    match frame {
        StreamFrame::Connected { connection_id } => Event::default()
            .event("connected")
            .data(format!("{{\"connection_id\":\"{connection_id}\"}}")),
        StreamFrame::Event(frame) => Event::default().event(frame.kind).data(frame.data),
        StreamFrame::Keepalive => Event::default().event("keepalive").data("{}"),
    }
}
