//! Image blob processing.

use tracing::info;

use super::{BlobInfo, BlobProcessor};
use crate::event::CloudEvent;

/// Placeholder image pipeline.
///
/// A real implementation would resize, extract metadata, and generate
/// thumbnails here. Currently records the event and returns.
pub struct ImageProcessor;

impl BlobProcessor for ImageProcessor {
    fn process(&self, blob: &BlobInfo, _event: &CloudEvent) {
        info!(
            blob_name = %blob.blob_name,
            container = %blob.container_name,
            content_length = blob.content_length,
            "image_blob_processing"
        );
    }
}
