//! Storage module for gallery image objects
//!
//! Provides a MinIO/S3-compatible client for uploads, deletes and presigned
//! PUT issuance.

mod object_store;

pub use object_store::ObjectStore;
