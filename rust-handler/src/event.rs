//! CloudEvents v1.0 envelope types.
//!
//! Events arrive either as raw JSON over the webhook endpoint or as
//! pre-parsed attributes from the platform push trigger. Both paths
//! normalize into [`CloudEvent`] before processing.

use serde::Serialize;
use serde_json::{Map, Value};

/// Event type delivered when a blob is written to a storage container.
///
/// Only this type triggers blob processing; any other type is acknowledged
/// and logged.
pub const BLOB_CREATED: &str = "Microsoft.Storage.BlobCreated";

/// A parsed CloudEvents v1.0 envelope.
///
/// Parsing is deliberately lenient: an absent or mistyped field defaults to
/// an empty string (`specversion` defaults to `"1.0"`, `data` to an empty
/// object) so that a delivery is never rejected over a malformed optional
/// field. No validation is applied to `specversion` or `type`.
#[derive(Debug, Clone, Serialize)]
pub struct CloudEvent {
    /// Event identifier
    pub id: String,
    /// URI identifying the event producer
    pub source: String,
    /// Dot-delimited event type, e.g. `Microsoft.Storage.BlobCreated`
    #[serde(rename = "type")]
    pub event_type: String,
    /// CloudEvents spec version
    #[serde(rename = "specversion")]
    pub spec_version: String,
    /// Event timestamp (ISO 8601), as delivered
    pub time: String,
    /// Producer-defined subject, often the blob path
    pub subject: String,
    /// Event payload
    pub data: Value,
}

impl CloudEvent {
    /// Parse an envelope from a JSON value.
    ///
    /// Never fails; missing fields silently default.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: text_field(value, "id"),
            source: text_field(value, "source"),
            event_type: text_field(value, "type"),
            spec_version: value
                .get("specversion")
                .and_then(Value::as_str)
                .unwrap_or("1.0")
                .to_string(),
            time: text_field(value, "time"),
            subject: text_field(value, "subject"),
            data: value
                .get("data")
                .filter(|v| v.is_object())
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
        }
    }
}

/// Read a string field, defaulting to empty when absent or not a string.
fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full_envelope() {
        let value = json!({
            "specversion": "1.0",
            "type": "Microsoft.Storage.BlobCreated",
            "source": "/subscriptions/abc/storageAccounts/acct",
            "id": "evt-1",
            "subject": "/blobServices/default/containers/mycontainer/blobs/myfile.png",
            "time": "2024-01-01T00:00:00Z",
            "data": {"url": "https://acct.blob.core.windows.net/mycontainer/myfile.png"}
        });

        let event = CloudEvent::from_value(&value);

        assert_eq!(event.id, "evt-1");
        assert_eq!(event.event_type, BLOB_CREATED);
        assert_eq!(event.spec_version, "1.0");
        assert_eq!(event.source, "/subscriptions/abc/storageAccounts/acct");
        assert_eq!(event.time, "2024-01-01T00:00:00Z");
        assert!(event.data.get("url").is_some());
    }

    #[test]
    fn test_from_value_missing_fields_default() {
        let event = CloudEvent::from_value(&json!({}));

        assert_eq!(event.id, "");
        assert_eq!(event.source, "");
        assert_eq!(event.event_type, "");
        assert_eq!(event.time, "");
        assert_eq!(event.subject, "");
        assert_eq!(event.spec_version, "1.0");
        assert_eq!(event.data, json!({}));
    }

    #[test]
    fn test_from_value_mistyped_fields_default() {
        let value = json!({
            "id": 42,
            "type": ["not", "a", "string"],
            "specversion": 1.0,
            "data": "not an object"
        });

        let event = CloudEvent::from_value(&value);

        assert_eq!(event.id, "");
        assert_eq!(event.event_type, "");
        assert_eq!(event.spec_version, "1.0");
        assert_eq!(event.data, json!({}));
    }

    #[test]
    fn test_from_value_keeps_unvalidated_specversion() {
        let event = CloudEvent::from_value(&json!({"specversion": "0.3-draft"}));
        assert_eq!(event.spec_version, "0.3-draft");
    }

    #[test]
    fn test_serialize_uses_wire_field_names() {
        let event = CloudEvent::from_value(&json!({"type": "Test.Event"}));
        let serialized = serde_json::to_value(&event).unwrap();

        assert_eq!(serialized["type"], "Test.Event");
        assert_eq!(serialized["specversion"], "1.0");
    }
}
