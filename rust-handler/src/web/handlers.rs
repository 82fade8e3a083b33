//! Webhook endpoint handlers.
//!
//! The CloudEvents endpoint answers two kinds of requests on the same
//! route: the validation handshake (OPTIONS) and event deliveries (POST).
//! Handlers parse leniently and always acknowledge a well-formed delivery;
//! only an absent or unparseable body is rejected.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::event::{CloudEvent, BLOB_CREATED};
use crate::process::{process_blob_created, Dispatcher};
use crate::web::handshake;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// CloudEvents Webhook
// =============================================================================

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

/// CloudEvents delivery endpoint (POST).
///
/// This endpoint:
/// 1. Rejects an absent or unparseable JSON body with 400
/// 2. Parses the envelope leniently (missing fields default)
/// 3. Runs the blob pipeline for `Microsoft.Storage.BlobCreated`
/// 4. Acknowledges any other event type with 200
pub async fn receive_cloudevents(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    if body.is_empty() {
        warn!("cloudevent_body_missing");
        return (
            StatusCode::BAD_REQUEST,
            Json(WebhookResponse {
                status: "missing_body",
                event_id: None,
            }),
        );
    }

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, body_length = body.len(), "cloudevent_body_invalid");
            return (
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse {
                    status: "invalid_json",
                    event_id: None,
                }),
            );
        }
    };

    let event = CloudEvent::from_value(&value);

    info!(
        id = %event.id,
        source = %event.source,
        event_type = %event.event_type,
        spec_version = %event.spec_version,
        subject = %event.subject,
        event_time = %event.time,
        "cloudevent_received"
    );

    if event.event_type == BLOB_CREATED {
        process_blob_created(&event, &state.dispatcher);

        info!(id = %event.id, "cloudevent_processed");

        (
            StatusCode::OK,
            Json(WebhookResponse {
                status: "processed",
                event_id: Some(event.id),
            }),
        )
    } else {
        // Unrecognized types are acknowledged so the platform does not
        // redeliver them.
        warn!(event_type = %event.event_type, "cloudevent_type_unrecognized");

        (
            StatusCode::OK,
            Json(WebhookResponse {
                status: "ignored",
                event_id: Some(event.id),
            }),
        )
    }
}

/// CloudEvents validation handshake endpoint (OPTIONS).
///
/// Echoes `WebHook-Request-Origin` back as `WebHook-Allowed-Origin`, or
/// answers 400 when the probe carries no origin.
pub async fn cloudevents_handshake(headers: HeaderMap) -> Response {
    match handshake::requested_origin(&headers) {
        Some(origin) => {
            info!(origin = ?origin, "cloudevent_handshake_accepted");
            (
                StatusCode::OK,
                [(HeaderName::from_static(handshake::ALLOWED_ORIGIN), origin)],
            )
                .into_response()
        }
        None => {
            warn!("cloudevent_handshake_missing_origin");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{BlobInfo, BlobProcessor};
    use crate::web::router;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Test double that counts invocations.
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<AtomicUsize>,
    }

    impl Recorder {
        fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl BlobProcessor for Recorder {
        fn process(&self, _blob: &BlobInfo, _event: &CloudEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// State with one recorder for the image slot and a shared recorder
    /// for the remaining three.
    fn recording_state() -> (AppState, Recorder, Recorder) {
        let image = Recorder::default();
        let others = Recorder::default();
        let dispatcher = Dispatcher::new(
            Box::new(image.clone()),
            Box::new(others.clone()),
            Box::new(others.clone()),
            Box::new(others.clone()),
        );
        let state = AppState::new(Config { port: 0 }, dispatcher);
        (state, image, others)
    }

    fn blob_created_body() -> String {
        json!({
            "specversion": "1.0",
            "type": "Microsoft.Storage.BlobCreated",
            "source": "/subscriptions/abc/storageAccounts/acct",
            "id": "evt-1",
            "subject": "/blobServices/default/containers/mycontainer/blobs/myfile.png",
            "time": "2024-01-01T00:00:00Z",
            "data": {
                "url": "https://acct.blob.core.windows.net/mycontainer/myfile.png",
                "contentType": "image/png",
                "contentLength": 524288
            }
        })
        .to_string()
    }

    async fn response_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_handshake_echoes_origin() {
        let (state, _, _) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/cloudevents")
            .header("WebHook-Request-Origin", "https://example.com")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("WebHook-Allowed-Origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn test_handshake_without_origin_is_rejected() {
        let (state, _, _) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/cloudevents")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("WebHook-Allowed-Origin").is_none());
    }

    #[tokio::test]
    async fn test_post_empty_body_is_rejected() {
        let (state, image, others) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/cloudevents")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(image.count() + others.count(), 0);
    }

    #[tokio::test]
    async fn test_post_invalid_json_is_rejected() {
        let (state, image, others) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/cloudevents")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(image.count() + others.count(), 0);
    }

    #[tokio::test]
    async fn test_post_blob_created_runs_pipeline_once() {
        let (state, image, others) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/cloudevents")
            .header("content-type", "application/json")
            .body(Body::from(blob_created_body()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(image.count(), 1);
        assert_eq!(others.count(), 0);

        let body = response_json(response).await;
        assert_eq!(body["status"], "processed");
        assert_eq!(body["event_id"], "evt-1");
    }

    #[tokio::test]
    async fn test_post_other_event_type_is_acknowledged_without_processing() {
        let (state, image, others) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/cloudevents")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "specversion": "1.0",
                    "type": "Microsoft.Storage.BlobDeleted",
                    "id": "evt-2",
                    "data": {"url": "https://acct.blob.core.windows.net/c/b.png"}
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(image.count() + others.count(), 0);

        let body = response_json(response).await;
        assert_eq!(body["status"], "ignored");
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected() {
        let (state, _, _) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .method("GET")
            .uri("/cloudevents")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let (state, _, _) = recording_state();
        let app = router(state);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );

        let body = response_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "1.0.0");

        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
