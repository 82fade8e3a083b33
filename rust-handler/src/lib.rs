//! GridHook - CloudEvents handler for storage blob-created notifications.
//!
//! This library backs the `gridhook-web` binary and the platform push
//! trigger adapter:
//! - `gridhook-web`: webhook server exposing `/cloudevents` and `/health`
//! - push trigger: the platform invokes [`handle_trigger_event`] with a
//!   pre-parsed event object
//!
//! ## Architecture
//!
//! ```text
//! Platform → (push trigger | POST /cloudevents) → CloudEvent → BlobInfo → Dispatcher → processor
//! ```

pub mod config;
pub mod event;
pub mod process;
pub mod trigger;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use event::{CloudEvent, BLOB_CREATED};
pub use process::{
    extract_blob_info, process_blob_created, BlobInfo, BlobProcessor, Dispatcher, ProcessorKind,
};
pub use trigger::{handle_trigger_event, TriggerError, TriggerEvent};
pub use web::AppState;
