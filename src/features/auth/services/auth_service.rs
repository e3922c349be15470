use std::sync::Arc;

use crate::core::config::AdminConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginResponseDto;
use crate::features::auth::services::TokenService;

/// Service for the admin login flow.
///
/// Compares the submitted password against the configured shared secret and
/// issues a bearer token on match. This is a coarse shared-secret scheme, not
/// per-user authentication.
pub struct AuthService {
    admin_password: String,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(config: &AdminConfig, token_service: Arc<TokenService>) -> Self {
        Self {
            admin_password: config.password.clone(),
            token_service,
        }
    }

    pub fn login(&self, password: &str) -> Result<LoginResponseDto> {
        if password != self.admin_password {
            tracing::warn!("Admin login attempt with invalid password");
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        let (token, expires_in) = self.token_service.issue()?;
        tracing::info!("Admin login successful, token valid for {}s", expires_in);

        Ok(LoginResponseDto { token, expires_in })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        let config = AdminConfig {
            password: "hunter2".to_string(),
            token_secret: "test-secret".to_string(),
            token_expiry_secs: 3600,
        };
        let token_service = Arc::new(TokenService::new(&config));
        AuthService::new(&config, token_service)
    }

    #[test]
    fn correct_password_issues_token() {
        let response = service().login("hunter2").unwrap();
        assert!(!response.token.is_empty());
        assert_eq!(response.expires_in, 3600);
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let err = service().login("letmein").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
