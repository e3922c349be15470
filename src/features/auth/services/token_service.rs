use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AdminConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AdminSession;

/// Claims carried by the admin bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates the admin session token.
///
/// Tokens are HS256 JWTs signed with the configured secret. Validation uses
/// zero leeway so the configured expiry is exact.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: u64,
}

impl TokenService {
    pub const SUBJECT: &'static str = "admin";

    pub fn new(config: &AdminConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            token_expiry_secs: config.token_expiry_secs,
        }
    }

    /// Issue a fresh admin token. Returns the token and its lifetime in
    /// seconds so the client can schedule its proactive logout.
    pub fn issue(&self) -> Result<(String, u64)> {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: Self::SUBJECT.to_string(),
            iat: now,
            exp: now + self.token_expiry_secs as i64,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign admin token: {}", e)))?;

        Ok((token, self.token_expiry_secs))
    }

    /// Validate a bearer token and return the session it represents.
    ///
    /// Expired or malformed tokens are rejected with `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<AdminSession> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<AdminClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid or expired token: {}", e)))?;

        if data.claims.sub != Self::SUBJECT {
            return Err(AppError::Unauthorized("Unknown token subject".to_string()));
        }

        Ok(AdminSession {
            sub: data.claims.sub,
        })
    }

    pub fn token_expiry_secs(&self) -> u64 {
        self.token_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(expiry_secs: u64) -> AdminConfig {
        AdminConfig {
            password: "hunter2".to_string(),
            token_secret: "test-secret".to_string(),
            token_expiry_secs: expiry_secs,
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new(&test_config(3600));

        let (token, expires_in) = service.issue().unwrap();
        assert_eq!(expires_in, 3600);

        let session = service.verify(&token).unwrap();
        assert_eq!(session.sub, TokenService::SUBJECT);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::new(&test_config(3600));

        // Sign a claim that expired two minutes ago with the same secret.
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: TokenService::SUBJECT.to_string(),
            iat: now - 3720,
            exp: now - 120,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = TokenService::new(&test_config(3600));

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: TokenService::SUBJECT.to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("wrong-secret".as_bytes()),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new(&test_config(3600));
        assert!(service.verify("not-a-jwt").is_err());
    }
}
