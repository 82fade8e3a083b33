//! Text blob processing.

use tracing::info;

use super::{BlobInfo, BlobProcessor};
use crate::event::CloudEvent;

/// Placeholder text pipeline (content parsing, keyword extraction,
/// search indexing).
pub struct TextProcessor;

impl BlobProcessor for TextProcessor {
    fn process(&self, blob: &BlobInfo, _event: &CloudEvent) {
        info!(
            blob_name = %blob.blob_name,
            container = %blob.container_name,
            content_length = blob.content_length,
            "text_blob_processing"
        );
    }
}
