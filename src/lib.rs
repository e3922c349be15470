//! Decora backend library: gallery, leads, admin session, object storage and
//! the upload orchestration used by the operator CLI.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
