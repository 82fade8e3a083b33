//! Blob-created event processing module.
//!
//! This module turns a parsed [`CloudEvent`] into blob metadata and routes
//! it to a content-type-specific processor.
//!
//! ## Processing Flow
//!
//! ```text
//! CloudEvent → extract_blob_info() → Dispatcher → BlobProcessor
//! ```

pub mod extract;
pub mod generic;
pub mod image;
pub mod json_data;
pub mod text;

use tracing::info;

use crate::event::CloudEvent;

pub use extract::{extract_blob_info, BlobInfo};
pub use generic::GenericProcessor;
pub use image::ImageProcessor;
pub use json_data::JsonProcessor;
pub use text::TextProcessor;

/// A content-type-specific blob processor.
///
/// Implementations are invoked with the blob metadata and the envelope it
/// arrived in, and must not panic for any well-formed input. The built-in
/// processors only log; real processing pipelines slot in by replacing
/// them on the [`Dispatcher`].
pub trait BlobProcessor: Send + Sync {
    fn process(&self, blob: &BlobInfo, event: &CloudEvent);
}

/// Processor selection, derived from the blob's content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorKind {
    Image,
    Text,
    Json,
    Generic,
}

impl ProcessorKind {
    /// Route a content type to a processor. First match wins,
    /// case-sensitive: an `image/` prefix, a `text/` prefix, exactly
    /// `application/json`, then the generic fallback (including an empty
    /// content type).
    pub fn for_content_type(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            ProcessorKind::Image
        } else if content_type.starts_with("text/") {
            ProcessorKind::Text
        } else if content_type == "application/json" {
            ProcessorKind::Json
        } else {
            ProcessorKind::Generic
        }
    }

    /// Label used in log output.
    fn as_str(self) -> &'static str {
        match self {
            ProcessorKind::Image => "image",
            ProcessorKind::Text => "text",
            ProcessorKind::Json => "json",
            ProcessorKind::Generic => "generic",
        }
    }
}

/// Routes blob metadata to one of four content-type processors.
///
/// Holds one processor per [`ProcessorKind`]; construction with
/// [`Dispatcher::new`] substitutes custom implementations (or test
/// doubles) without touching the routing logic.
pub struct Dispatcher {
    image: Box<dyn BlobProcessor>,
    text: Box<dyn BlobProcessor>,
    json: Box<dyn BlobProcessor>,
    generic: Box<dyn BlobProcessor>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(
            Box::new(ImageProcessor),
            Box::new(TextProcessor),
            Box::new(JsonProcessor),
            Box::new(GenericProcessor),
        )
    }
}

impl Dispatcher {
    /// Create a dispatcher with explicit processors for each kind.
    pub fn new(
        image: Box<dyn BlobProcessor>,
        text: Box<dyn BlobProcessor>,
        json: Box<dyn BlobProcessor>,
        generic: Box<dyn BlobProcessor>,
    ) -> Self {
        Self {
            image,
            text,
            json,
            generic,
        }
    }

    /// Route the blob to exactly one processor by content type.
    pub fn dispatch(&self, blob: &BlobInfo, event: &CloudEvent) {
        let kind = ProcessorKind::for_content_type(&blob.content_type);

        info!(
            blob_name = %blob.blob_name,
            content_type = %blob.content_type,
            processor = kind.as_str(),
            "blob_routing"
        );

        self.processor(kind).process(blob, event);
    }

    fn processor(&self, kind: ProcessorKind) -> &dyn BlobProcessor {
        match kind {
            ProcessorKind::Image => self.image.as_ref(),
            ProcessorKind::Text => self.text.as_ref(),
            ProcessorKind::Json => self.json.as_ref(),
            ProcessorKind::Generic => self.generic.as_ref(),
        }
    }
}

/// Process a blob-created envelope: extract blob metadata from the event
/// payload and dispatch it.
pub fn process_blob_created(event: &CloudEvent, dispatcher: &Dispatcher) {
    let blob = extract_blob_info(&event.data);

    info!(
        blob_name = %blob.blob_name,
        container = %blob.container_name,
        content_type = %blob.content_type,
        content_length = blob.content_length,
        event_time = %event.time,
        "blob_created_processing"
    );

    dispatcher.dispatch(&blob, event);
}
