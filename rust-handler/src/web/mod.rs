//! Web server module for the webhook delivery path.
//!
//! This module provides the HTTP surface of the handler:
//! - `POST /cloudevents` — event deliveries
//! - `OPTIONS /cloudevents` — the CloudEvents validation handshake
//! - `GET /health` — liveness probe
//!
//! The router is built here so the binary and the tests share one service.

pub mod handlers;
pub mod handshake;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use handlers::{
    cloudevents_handshake, health, receive_cloudevents, AppState, HealthResponse,
    WebhookResponse,
};
pub use handshake::{requested_origin, ALLOWED_ORIGIN, REQUEST_ORIGIN};

/// Build the webhook service.
///
/// Unmatched methods on `/cloudevents` answer 405 via the method router;
/// a panic anywhere in a handler is converted to a 500 response.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/cloudevents",
            post(receive_cloudevents).options(cloudevents_handshake),
        )
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
