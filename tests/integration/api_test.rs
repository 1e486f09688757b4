//! Integration tests for the JSON endpoints: health, publish, and
//! control frames.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_ok() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body.get("version").is_some());
}

#[tokio::test]
async fn test_health_detailed_reports_hub_stats() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["chat"]["connections"], 0);
    assert_eq!(response.body["chat"]["topics"], 0);
    assert_eq!(response.body["announcements"]["connections"], 0);
    assert_eq!(response.body["ticker"]["connections"], 0);
}

#[tokio::test]
async fn test_post_message_without_subscribers_delivers_zero() {
    let app = TestApp::new();
    let room_id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{}/messages", room_id),
            Some(serde_json::json!({ "body": "hello" })),
            Some(Uuid::new_v4()),
        )
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["delivered"], 0);
    assert!(response.body.get("id").is_some());
}

#[tokio::test]
async fn test_post_message_rejects_empty_body() {
    let app = TestApp::new();
    let room_id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{}/messages", room_id),
            Some(serde_json::json!({ "body": "   " })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_typing_indicator_without_subscribers() {
    let app = TestApp::new();
    let room_id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{}/typing", room_id),
            None,
            Some(Uuid::new_v4()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["delivered"], 0);
}

#[tokio::test]
async fn test_post_announcement_accepted() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(serde_json::json!({
                "title": "Maintenance window",
                "body": "Saturday 02:00 UTC",
                "course_id": null,
            })),
            Some(Uuid::new_v4()),
        )
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["delivered"], 0);
}

#[tokio::test]
async fn test_post_announcement_rejects_empty_title() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(serde_json::json!({ "title": "", "body": "x", "course_id": null })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_command_on_unknown_connection_is_not_found() {
    let app = TestApp::new();
    let connection_id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/api/chat/connections/{}/commands", connection_id),
            Some(serde_json::json!({
                "type": "join-room",
                "room_id": Uuid::new_v4(),
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_command_with_unknown_kind_is_rejected() {
    let app = TestApp::new();
    let connection_id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/api/chat/connections/{}/commands", connection_id),
            Some(serde_json::json!({ "type": "self-destruct" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "UNKNOWN_EVENT_KIND");
}

#[tokio::test]
async fn test_command_with_malformed_payload_is_rejected() {
    let app = TestApp::new();
    let connection_id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/api/chat/connections/{}/commands", connection_id),
            Some(serde_json::json!({ "type": "join-room" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "MALFORMED_EVENT");
}

#[tokio::test]
async fn test_invalid_user_header_is_unauthorized() {
    let app = TestApp::new();
    let room_id = Uuid::new_v4();

    let req = http::Request::builder()
        .method("POST")
        .uri(format!("/api/chat/rooms/{}/typing", room_id))
        .header("x-studyhub-user", "not-a-uuid")
        .body(axum::body::Body::empty())
        .expect("Failed to build request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
