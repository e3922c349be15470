//! Upload orchestration library
//!
//! Sequences the multi-file gallery submission flow used by the operator CLI:
//! per file, presign → direct PUT with progress and retry; then one gallery
//! record created from the collected object keys. The submission is
//! all-or-nothing: any file exhausting its retry budget aborts the whole
//! thing and no record is created. Orphaned objects from an aborted run are
//! accepted garbage.
//!
//! The transport is a trait seam so the sequencing logic is testable without
//! a server; [`ApiTransport`] drives the real HTTP API.

mod orchestrator;
mod progress;
mod transport;

pub use orchestrator::{FileStatus, UploadItem, UploadObserver, UploadOrchestrator, UploadPlan};
pub use progress::ProgressTracker;
pub use transport::{ApiTransport, CreateGalleryRequest, UploadError, UploadTransport};
