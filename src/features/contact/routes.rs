use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::contact::handlers;
use crate::features::contact::services::ContactService;

/// Public contact routes (form submission)
pub fn public_routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::create_contact_message))
        .with_state(service)
}

/// Admin contact routes (lead management); gated by the bearer-token
/// middleware in main.
pub fn admin_routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route(
            "/api/contact",
            get(handlers::list_leads).delete(handlers::close_lead),
        )
        .route("/api/contact/export", get(handlers::export_leads))
        .with_state(service)
}
