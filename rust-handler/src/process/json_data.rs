//! JSON blob processing.

use tracing::info;

use super::{BlobInfo, BlobProcessor};
use crate::event::CloudEvent;

/// Placeholder JSON pipeline (schema validation, transformation).
pub struct JsonProcessor;

impl BlobProcessor for JsonProcessor {
    fn process(&self, blob: &BlobInfo, _event: &CloudEvent) {
        info!(
            blob_name = %blob.blob_name,
            container = %blob.container_name,
            content_length = blob.content_length,
            "json_blob_processing"
        );
    }
}
