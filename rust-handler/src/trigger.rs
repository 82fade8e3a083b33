//! Platform push-trigger entry point.
//!
//! When a push subscription is configured, the hosting platform invokes
//! the handler directly with a pre-parsed event object instead of going
//! through the webhook endpoint. The event object is modeled as the
//! [`TriggerEvent`] trait so the handler can be exercised with a test
//! double and carries no platform dependency.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::event::CloudEvent;
use crate::process::{process_blob_created, Dispatcher};

/// The platform-injected event object, reduced to the capabilities the
/// handler needs: envelope attributes plus a JSON body accessor.
pub trait TriggerEvent {
    fn id(&self) -> &str;
    fn source(&self) -> &str;
    fn subject(&self) -> &str;
    fn event_type(&self) -> &str;
    fn time(&self) -> &str;

    /// Schema version of the event payload. Platforms that do not report
    /// one get the `"unknown"` default.
    fn data_version(&self) -> &str {
        "unknown"
    }

    /// The event's `data` payload, decoded from JSON. `None` when the
    /// event carries no payload.
    fn json_body(&self) -> Result<Option<Value>, serde_json::Error>;
}

/// Failure while handling a push-trigger delivery.
///
/// Propagated back to the invoking platform, whose redelivery policy
/// applies; nothing is retried in-process.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("failed to decode event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Handle a blob-created event delivered by the platform push trigger.
///
/// The subscription filter is trusted on this path, so no event-type check
/// is applied. An event without a payload is logged and acknowledged; a
/// payload that fails to decode propagates to the caller.
pub fn handle_trigger_event(
    event: &dyn TriggerEvent,
    dispatcher: &Dispatcher,
) -> Result<(), TriggerError> {
    info!(
        id = %event.id(),
        source = %event.source(),
        subject = %event.subject(),
        event_type = %event.event_type(),
        event_time = %event.time(),
        data_version = %event.data_version(),
        "trigger_event_received"
    );

    let data = event.json_body()?;

    match data {
        Some(data) if has_payload(&data) => {
            let envelope = CloudEvent {
                id: event.id().to_string(),
                source: event.source().to_string(),
                event_type: event.event_type().to_string(),
                spec_version: event.data_version().to_string(),
                time: event.time().to_string(),
                subject: event.subject().to_string(),
                data,
            };
            process_blob_created(&envelope, dispatcher);
        }
        _ => {
            warn!(id = %event.id(), "trigger_event_missing_data");
        }
    }

    Ok(())
}

/// An empty object or null payload counts as missing.
fn has_payload(data: &Value) -> bool {
    match data {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}
