//! Integration tests for the SSE stream endpoints.
//!
//! The router is cloned per request but all clones share the same hub
//! state, so a publish issued through one request is delivered to a
//! stream opened by another.

use futures::StreamExt;
use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

/// Reads the next non-empty chunk from a streaming body as UTF-8.
async fn next_chunk(body: &mut axum::body::BodyDataStream) -> String {
    let bytes = body
        .next()
        .await
        .expect("stream ended unexpectedly")
        .expect("stream errored");
    String::from_utf8(bytes.to_vec()).expect("chunk is not UTF-8")
}

#[tokio::test]
async fn test_chat_stream_opens_with_connected_frame() {
    let app = TestApp::new();
    let room_id = Uuid::new_v4();

    let response = app
        .raw_request("GET", &format!("/api/chat/rooms/{}/events", room_id))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let mut body = response.into_body().into_data_stream();
    let first = next_chunk(&mut body).await;
    assert!(first.contains("event: connected"));
    assert!(first.contains("connection_id"));
}

#[tokio::test]
async fn test_message_published_while_stream_open_is_delivered() {
    let app = TestApp::new();
    let room_id = Uuid::new_v4();

    let response = app
        .raw_request("GET", &format!("/api/chat/rooms/{}/events", room_id))
        .await;
    let mut body = response.into_body().into_data_stream();

    // Drain the connected frame before publishing.
    let first = next_chunk(&mut body).await;
    assert!(first.contains("event: connected"));

    let publish = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{}/messages", room_id),
            Some(serde_json::json!({ "body": "hello room" })),
            Some(Uuid::new_v4()),
        )
        .await;
    assert_eq!(publish.status, StatusCode::ACCEPTED);
    assert_eq!(publish.body["delivered"], 1);

    let frame = next_chunk(&mut body).await;
    assert!(frame.contains("event: message-sent"));
    assert!(frame.contains("hello room"));
}

#[tokio::test]
async fn test_publish_to_other_room_is_not_delivered() {
    let app = TestApp::new();
    let room_a = Uuid::new_v4();
    let room_b = Uuid::new_v4();

    let response = app
        .raw_request("GET", &format!("/api/chat/rooms/{}/events", room_a))
        .await;
    let mut body = response.into_body().into_data_stream();
    let _ = next_chunk(&mut body).await;

    let publish = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{}/messages", room_b),
            Some(serde_json::json!({ "body": "wrong room" })),
            None,
        )
        .await;
    assert_eq!(publish.status, StatusCode::ACCEPTED);
    assert_eq!(publish.body["delivered"], 0);
}

#[tokio::test]
async fn test_dropping_stream_unregisters_connection() {
    let app = TestApp::new();
    let room_id = Uuid::new_v4();

    let response = app
        .raw_request("GET", &format!("/api/chat/rooms/{}/events", room_id))
        .await;
    let mut body = response.into_body().into_data_stream();
    let _ = next_chunk(&mut body).await;
    assert_eq!(app.state.chat.connection_count(), 1);

    drop(body);
    // Teardown runs when the response body (and the stream inside it)
    // is dropped, synchronously on this task.
    assert_eq!(app.state.chat.connection_count(), 0);
    assert_eq!(app.state.chat.topic_count(), 0);
}

#[tokio::test]
async fn test_announcement_broadcast_reaches_course_subscriber() {
    let app = TestApp::new();
    let course_id = Uuid::new_v4();

    let response = app
        .raw_request(
            "GET",
            &format!("/api/announcements/events?course_id={}", course_id),
        )
        .await;
    let mut body = response.into_body().into_data_stream();
    let _ = next_chunk(&mut body).await;

    // Platform-wide announcement (no course) targets every connection.
    let publish = app
        .request(
            "POST",
            "/api/announcements",
            Some(serde_json::json!({
                "title": "Platform update",
                "body": "New features",
                "course_id": null,
            })),
            Some(Uuid::new_v4()),
        )
        .await;
    assert_eq!(publish.status, StatusCode::ACCEPTED);
    assert_eq!(publish.body["delivered"], 1);

    let frame = next_chunk(&mut body).await;
    assert!(frame.contains("event: announcement-posted"));
}

#[tokio::test]
async fn test_join_room_command_reroutes_stream() {
    let app = TestApp::new();
    let room_a = Uuid::new_v4();
    let room_b = Uuid::new_v4();

    let response = app
        .raw_request("GET", &format!("/api/chat/rooms/{}/events", room_a))
        .await;
    let mut body = response.into_body().into_data_stream();
    let connected = next_chunk(&mut body).await;

    let connection_id = extract_connection_id(&connected);

    let command = app
        .request(
            "POST",
            &format!("/api/chat/connections/{}/commands", connection_id),
            Some(serde_json::json!({ "type": "join-room", "room_id": room_b })),
            None,
        )
        .await;
    assert_eq!(command.status, StatusCode::OK);
    assert_eq!(command.body["applied"], "join-room");

    let publish = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{}/messages", room_b),
            Some(serde_json::json!({ "body": "now in b" })),
            None,
        )
        .await;
    assert_eq!(publish.body["delivered"], 1);

    let frame = next_chunk(&mut body).await;
    assert!(frame.contains("now in b"));
}

/// Pulls the connection id out of the connected frame's data line.
fn extract_connection_id(connected_frame: &str) -> Uuid {
    let json_start = connected_frame
        .find('{')
        .expect("connected frame carries JSON data");
    let json_end = connected_frame
        .rfind('}')
        .expect("connected frame carries JSON data");
    let data: serde_json::Value = serde_json::from_str(&connected_frame[json_start..=json_end])
        .expect("connected frame data is JSON");
    data["connection_id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("connected frame carries a connection id")
}
