//! Admin session feature.
//!
//! A single shared password is compared server-side; on match a short-lived
//! HS256 bearer token is issued. Protected routes validate the token through
//! [`crate::core::middleware::admin_auth_middleware`].
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/admin/login` | No | Exchange the admin password for a bearer token |

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
