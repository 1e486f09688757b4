//! Chat room handlers: SSE subscribe, publish, and control frames.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use studyhub_core::error::AppError;
use studyhub_realtime::event::chat::{ChatEvent, room_topic};
use studyhub_realtime::event::codec::{self, ClientCommand};
use studyhub_realtime::stream_frames;

use crate::dto::request::PostMessageRequest;
use crate::dto::response::{CommandResponse, DeliveryResponse, PublishResponse};
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::sse::sse_response;
use crate::state::AppState;

/// GET /api/chat/rooms/{room_id}/events — long-lived SSE stream.
pub async fn subscribe_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    caller: Caller,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state
        .chat
        .subscribe(caller.identity(), vec![room_topic(room_id)])?;
    let frames = stream_frames(subscription, state.chat.keepalive_interval());
    Ok(sse_response(frames))
}

/// POST /api/chat/rooms/{room_id}/messages — publish a message event.
///
/// Durable storage is the chat CRUD service's job; this is the
/// in-process publish half that runs after its write.
pub async fn post_message(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    caller: Caller,
    Json(request): Json<PostMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.body.trim().is_empty() {
        return Err(AppError::validation("message body is empty").into());
    }

    let message_id = Uuid::new_v4();
    let delivered = state.chat.publish(&ChatEvent::MessageSent {
        room_id,
        message_id,
        sender: caller.identity(),
        body: request.body,
        sent_at: Utc::now(),
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(PublishResponse {
            id: message_id,
            delivered,
        }),
    ))
}

/// POST /api/chat/rooms/{room_id}/typing — publish a typing indicator.
pub async fn post_typing(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    caller: Caller,
) -> Json<DeliveryResponse> {
    let delivered = state.chat.publish(&ChatEvent::UserTyping {
        room_id,
        user: caller.identity(),
    });
    Json(DeliveryResponse { delivered })
}

/// POST /api/chat/connections/{connection_id}/commands — apply a
/// client control frame (room switch) to a live connection.
pub async fn post_command(
    State(state): State<AppState>,
    Path(connection_id): Path<Uuid>,
    body: String,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = codec::decode_client_command(&body)?;

    let applied = match &command {
        ClientCommand::JoinRoom { room_id } => {
            state
                .chat
                .change_subscription(&connection_id, vec![room_topic(*room_id)], vec![])?;
            "join-room"
        }
        ClientCommand::LeaveRoom { room_id } => {
            state
                .chat
                .change_subscription(&connection_id, vec![], vec![room_topic(*room_id)])?;
            "leave-room"
        }
    };

    Ok(Json(CommandResponse {
        applied: applied.to_string(),
    }))
}
