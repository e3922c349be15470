use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::features::gallery::dtos::MAX_IMAGE_SIZE;
use crate::features::gallery::handlers;
use crate::features::gallery::handlers::GalleryState;

/// Public gallery routes (browsing)
pub fn public_routes(state: GalleryState) -> Router {
    Router::new()
        .route("/api/gallery", get(handlers::list_gallery))
        .route("/api/gallery/{design_id}", get(handlers::get_gallery_item))
        .with_state(state)
}

/// Admin gallery routes (upload, presign, delete); gated by the bearer-token
/// middleware in main.
pub fn admin_routes(state: GalleryState) -> Router {
    Router::new()
        .route("/api/gallery", post(handlers::create_gallery_item))
        .route(
            "/api/gallery/upload",
            // Allow body size up to MAX_IMAGE_SIZE + buffer for multipart overhead
            post(handlers::upload_gallery_item)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/gallery/presign-upload",
            post(handlers::presign_upload),
        )
        .route(
            "/api/gallery/{design_id}",
            delete(handlers::delete_gallery_item),
        )
        .with_state(state)
}
