//! Blob metadata extraction from blob-created event payloads.
//!
//! The storage platform reports created blobs with a flat JSON payload
//! (`url`, `contentType`, `contentLength`, ...). Extraction is best-effort:
//! absent fields default to empty/zero, and a payload that fails extraction
//! outright is recovered as an empty [`BlobInfo`] with a logged warning, so
//! a delivery is never rejected over a malformed optional field.

use serde_json::Value;
use tracing::warn;

/// Metadata about a created blob, derived from the event payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobInfo {
    /// Full blob URL
    pub url: String,
    /// Storage API operation that created the blob, e.g. `PutBlob`
    pub api: String,
    /// Client-supplied request id
    pub client_request_id: String,
    /// Storage-service request id
    pub request_id: String,
    /// Blob entity tag
    pub etag: String,
    /// MIME content type
    pub content_type: String,
    /// Blob size in bytes
    pub content_length: u64,
    /// Storage blob kind, e.g. `BlockBlob`
    pub blob_type: String,
    /// Per-blob ordering token from the storage service
    pub sequencer: String,
    /// Blob name, derived from the last url path segment
    pub blob_name: String,
    /// Container name, derived from the second-to-last url path segment
    pub container_name: String,
}

/// Extract blob metadata from a blob-created event payload.
///
/// Recovers from a malformed payload by returning a defaulted struct
/// instead of failing, so processing always continues with best-effort
/// data.
pub fn extract_blob_info(data: &Value) -> BlobInfo {
    match try_extract(data) {
        Ok(info) => info,
        Err(err) => {
            warn!(error = %err, "blob_info_extract_failed");
            BlobInfo::default()
        }
    }
}

/// Fallible inner extraction.
///
/// The only hard failure is a `contentLength` that is present but not a
/// non-negative integer; everything else defaults field-by-field.
fn try_extract(data: &Value) -> Result<BlobInfo, String> {
    let content_length = match data.get("contentLength") {
        None | Some(Value::Null) => 0,
        Some(value) => value
            .as_u64()
            .ok_or_else(|| format!("contentLength is not a non-negative integer: {value}"))?,
    };

    let url = text_field(data, "url");
    let (blob_name, container_name) = split_blob_url(&url);

    Ok(BlobInfo {
        api: text_field(data, "api"),
        client_request_id: text_field(data, "clientRequestId"),
        request_id: text_field(data, "requestId"),
        etag: text_field(data, "eTag"),
        content_type: text_field(data, "contentType"),
        content_length,
        blob_type: text_field(data, "blobType"),
        sequencer: text_field(data, "sequencer"),
        url,
        blob_name,
        container_name,
    })
}

/// Derive `(blob_name, container_name)` from the blob url.
///
/// The blob name is the last `/`-separated segment and the container name
/// the second-to-last. An empty url, or one with fewer than two segments,
/// yields empty names.
fn split_blob_url(url: &str) -> (String, String) {
    if url.is_empty() {
        return (String::new(), String::new());
    }

    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 2 {
        return (String::new(), String::new());
    }

    (
        segments[segments.len() - 1].to_string(),
        segments[segments.len() - 2].to_string(),
    )
}

/// Read a string field, defaulting to empty when absent or not a string.
fn text_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
