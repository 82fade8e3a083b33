//! Fallback processing for unrecognized content types.

use tracing::info;

use super::{BlobInfo, BlobProcessor};
use crate::event::CloudEvent;

/// Catch-all processor for blobs no specific pipeline claims.
pub struct GenericProcessor;

impl BlobProcessor for GenericProcessor {
    fn process(&self, blob: &BlobInfo, _event: &CloudEvent) {
        info!(
            blob_name = %blob.blob_name,
            container = %blob.container_name,
            content_type = %blob.content_type,
            content_length = blob.content_length,
            "generic_blob_processing"
        );
    }
}
