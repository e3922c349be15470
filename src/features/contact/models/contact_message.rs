use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a contact-form submission (a lead).
///
/// `design_id` is a soft reference to a gallery image; it is not enforced by
/// a foreign key and may outlive the image it points at.
#[derive(Debug, Clone, FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_date: Option<String>,
    pub design_id: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
