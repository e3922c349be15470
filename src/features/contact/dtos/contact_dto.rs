use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::contact::models::ContactMessage;

/// Request DTO for the public contact form
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactMessageDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    /// Free-form event date as entered in the form
    pub event_date: Option<String>,
    /// Soft reference to a gallery design the enquiry is about
    pub design_id: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Response DTO for a lead
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_date: Option<String>,
    pub design_id: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for LeadResponseDto {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            event_date: m.event_date,
            design_id: m.design_id,
            message: m.message,
            created_at: m.created_at,
        }
    }
}

/// Request DTO for closing lead(s) by phone number
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CloseLeadDto {
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

/// Response DTO for lead closing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CloseLeadResponseDto {
    /// Number of leads closed
    pub closed: i64,
}
