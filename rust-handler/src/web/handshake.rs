//! CloudEvents webhook validation handshake.
//!
//! Before a push platform starts delivering events to a webhook it probes
//! the endpoint with an OPTIONS request carrying `WebHook-Request-Origin`.
//! The receiver consents by echoing the origin back in
//! `WebHook-Allowed-Origin`; a probe without the header is rejected.
//! Reference: CloudEvents HTTP webhook spec, "Abuse Protection".

use axum::http::{HeaderMap, HeaderValue};

/// Inbound handshake header (`WebHook-Request-Origin`).
pub const REQUEST_ORIGIN: &str = "webhook-request-origin";

/// Outbound consent header (`WebHook-Allowed-Origin`).
pub const ALLOWED_ORIGIN: &str = "webhook-allowed-origin";

/// The origin to grant, taken verbatim from the validation request.
///
/// `None` when the request carries no origin header, which fails the
/// handshake.
pub fn requested_origin(headers: &HeaderMap) -> Option<HeaderValue> {
    headers.get(REQUEST_ORIGIN).cloned()
}
