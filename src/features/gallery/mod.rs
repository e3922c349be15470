//! Gallery feature: public browsing plus the admin upload surface.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/gallery` | No | List images, filter by category or free-text search |
//! | GET | `/api/gallery/{design_id}` | No | Fetch one image by design id |
//! | POST | `/api/gallery` | Bearer | Create a record from pre-uploaded object keys |
//! | POST | `/api/gallery/upload` | Bearer | Single-file multipart create |
//! | POST | `/api/gallery/presign-upload` | Bearer | Issue a presigned PUT target |
//! | DELETE | `/api/gallery/{design_id}` | Bearer | Delete record and backing objects |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::GalleryState;
pub use services::{DesignIdService, GalleryService};
