//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use studyhub_api::AppState;
use studyhub_api::extractors::USER_HEADER;
use studyhub_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for publishing and inspecting hubs directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with default configuration.
    pub fn new() -> Self {
        let config = AppConfig::default();
        let state = AppState::new(config);
        let router = studyhub_api::build_router(state.clone());
        Self { router, state }
    }

    /// Send a JSON request and collect the full response body.
    ///
    /// Not suitable for SSE endpoints, whose bodies never end; use
    /// [`TestApp::raw_request`] for those.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<Uuid>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user) = user {
            req = req.header(USER_HEADER, user.to_string());
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Send a request and return the raw response without reading the
    /// body, so streaming responses can be consumed incrementally.
    pub async fn raw_request(&self, method: &str, path: &str) -> Response<Body> {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request")
    }
}

/// Captured response for assertions
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
