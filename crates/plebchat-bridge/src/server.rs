//! HTTP router and shared state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use plebchat_gateway_discord::ConnectionStatus;

use crate::handlers;
use crate::relay::OutboundRelay;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub outbound: Arc<OutboundRelay>,
    pub health: HealthState,
}

/// Process diagnostics handle: start time plus the gateway connection
/// flag.
#[derive(Clone)]
pub struct HealthState {
    started_at: Instant,
    gateway: ConnectionStatus,
}

impl HealthState {
    pub fn new(gateway: ConnectionStatus) -> Self {
        Self {
            started_at: Instant::now(),
            gateway,
        }
    }

    pub fn discord_connected(&self) -> bool {
        self.gateway.connected()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    // CORS is wide open; the chat app calls this from arbitrary origins.
    Router::new()
        .route("/send-to-discord", post(handlers::send_to_discord))
        .route("/health", get(handlers::health))
        .route("/livez", get(handlers::livez))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingDelivery, RecordingDelivery};
    use crate::webhook::OutboundDelivery;

    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app_with(delivery: Option<Arc<dyn OutboundDelivery>>) -> Router {
        let state = AppState {
            outbound: Arc::new(OutboundRelay::new(delivery, None)),
            health: HealthState::new(ConnectionStatus::default()),
        };
        build_app(state, 5)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/send-to-discord")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn send_succeeds_for_a_valid_message() {
        let recorder = Arc::new(RecordingDelivery::default());
        let app = app_with(Some(recorder.clone()));

        let response = app
            .oneshot(post_json(r#"{"name":"Alice","text":"hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);

        let payloads = recorder.payloads.lock().unwrap();
        assert_eq!(payloads[0].content, "-=Alice=-\nhi");
    }

    #[tokio::test]
    async fn missing_name_is_bad_request_with_no_delivery() {
        let recorder = Arc::new(RecordingDelivery::default());
        let app = app_with(Some(recorder.clone()));

        let response = app.oneshot(post_json(r#"{"text":"hi"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(recorder.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_text_and_image_is_bad_request() {
        let recorder = Arc::new(RecordingDelivery::default());
        let app = app_with(Some(recorder.clone()));

        let response = app.oneshot(post_json(r#"{"name":"Alice"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(recorder.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_webhook_is_internal_error() {
        let app = app_with(None);

        let response = app
            .oneshot(post_json(r#"{"name":"Alice","text":"hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("not configured")
        );
    }

    #[tokio::test]
    async fn failed_delivery_is_internal_error() {
        let app = app_with(Some(Arc::new(FailingDelivery)));

        let response = app
            .oneshot(post_json(r#"{"name":"Alice","text":"hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn image_only_request_is_annotated() {
        let recorder = Arc::new(RecordingDelivery::default());
        let app = app_with(Some(recorder.clone()));

        let response = app
            .oneshot(post_json(r#"{"name":"Alice","imageData":"<data>"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payloads = recorder.payloads.lock().unwrap();
        assert_eq!(payloads[0].content, "-=Alice=-\n📸 *[Image]*");
    }

    #[tokio::test]
    async fn health_reports_gateway_status() {
        let app = app_with(None);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "Server running");
        assert_eq!(body["discord"], false);
    }

    #[tokio::test]
    async fn livez_answers_ok() {
        let app = app_with(None);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/livez")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
