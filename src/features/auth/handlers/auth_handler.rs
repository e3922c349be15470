use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Admin login
///
/// Exchanges the shared admin password for a time-limited bearer token.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 401, description = "Invalid password")
    ),
    tag = "admin"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = service.login(&dto.password)?;

    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Login successful".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::{routing::post, Router};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::core::config::AdminConfig;
    use crate::features::auth::services::{AuthService, TokenService};

    fn test_router() -> Router {
        let config = AdminConfig {
            password: "hunter2".to_string(),
            token_secret: "test-secret".to_string(),
            token_expiry_secs: 3600,
        };
        let token_service = Arc::new(TokenService::new(&config));
        let auth_service = Arc::new(AuthService::new(&config, token_service));

        Router::new()
            .route("/api/admin/login", post(super::login))
            .with_state(auth_service)
    }

    #[tokio::test]
    async fn login_with_correct_password_returns_token() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server
            .post("/api/admin/login")
            .json(&json!({"password": "hunter2"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["data"]["expiresIn"], 3600);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_401() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server
            .post("/api/admin/login")
            .json(&json!({"password": "letmein"}))
            .await;

        response.assert_status_unauthorized();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn login_with_empty_password_is_400() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server
            .post("/api/admin/login")
            .json(&json!({"password": ""}))
            .await;

        response.assert_status_bad_request();
    }
}
