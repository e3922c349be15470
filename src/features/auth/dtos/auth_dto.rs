use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for admin login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    /// The shared admin password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for a successful admin login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    /// Bearer token for the admin session
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}
