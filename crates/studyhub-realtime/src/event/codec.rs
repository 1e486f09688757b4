//! Wire encoding for outbound events and decoding for inbound client
//! control frames.
//!
//! Outbound frames follow the SSE shape: an `event:` line carrying the
//! kind and a `data:` line carrying the JSON payload. Encoding is total
//! for well-formed events. Decoding applies to client-originated
//! control frames only and rejects unknown tags and malformed payloads
//! without ending the stream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studyhub_core::AppError;

use super::HubEvent;

/// One encoded wire frame: `event: <kind>` / `data: <json>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame {
    /// Frame kind, written to the SSE `event:` field.
    pub kind: &'static str,
    /// JSON payload, written to the SSE `data:` field.
    pub data: String,
}

/// Encodes an event into a wire frame.
pub fn encode<E: HubEvent>(event: &E) -> Result<EventFrame, AppError> {
    let data = serde_json::to_string(event)?;
    Ok(EventFrame {
        kind: event.kind(),
        data,
    })
}

/// Control commands a client may send over the request channel, e.g.
/// when switching rooms mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientCommand {
    /// Subscribe the connection to an additional room.
    JoinRoom {
        /// Room to join.
        room_id: Uuid,
    },
    /// Unsubscribe the connection from a room.
    LeaveRoom {
        /// Room to leave.
        room_id: Uuid,
    },
}

const KNOWN_COMMANDS: &[&str] = &["join-room", "leave-room"];

/// Decodes a raw client control frame.
///
/// Unknown tags fail with `UnknownEventKind`; known tags with a
/// mismatched payload shape fail with `MalformedEvent`.
pub fn decode_client_command(raw: &str) -> Result<ClientCommand, AppError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| AppError::malformed_event(format!("frame is not valid JSON: {e}")))?;

    let tag = value
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::malformed_event("frame is missing a 'type' tag"))?
        .to_string();

    if !KNOWN_COMMANDS.contains(&tag.as_str()) {
        return Err(AppError::unknown_event_kind(format!(
            "unknown command kind '{tag}'"
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::malformed_event(format!("malformed '{tag}' payload: {e}")))
}
