use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Public auth routes (no authentication required)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/admin/login", post(handlers::login))
        .with_state(service)
}
