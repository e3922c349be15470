use sqlx::PgPool;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::contact::dtos::CreateContactMessageDto;
use crate::features::contact::models::ContactMessage;

const SELECT_COLUMNS: &str = "id, name, email, phone, event_date, design_id, message, created_at";

/// Service for lead storage and retrieval
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a public contact-form submission
    pub async fn create(&self, dto: CreateContactMessageDto) -> Result<ContactMessage> {
        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            r#"
            INSERT INTO contact_messages (name, email, phone, event_date, design_id, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.event_date)
        .bind(&dto.design_id)
        .bind(&dto.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert contact message: {:?}", e);
            AppError::Database(e)
        })?;

        info!("Lead created: id={}", message.id);

        Ok(message)
    }

    /// List all leads, newest first
    pub async fn list(&self) -> Result<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM contact_messages
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list contact messages: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(messages)
    }

    /// Close lead(s) by phone number. Every lead sharing the number is
    /// removed together; zero matches is a 404.
    pub async fn close_by_phone(&self, phone: &str) -> Result<i64> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE phone = $1")
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to close lead: {:?}", e);
                AppError::Database(e)
            })?;

        let closed = result.rows_affected() as i64;
        if closed == 0 {
            return Err(AppError::NotFound(format!(
                "No lead found for phone '{}'",
                phone
            )));
        }

        info!("Closed {} lead(s) for phone={}", closed, phone);

        Ok(closed)
    }

    /// Render all leads as a CSV document for download
    pub async fn export_csv(&self) -> Result<Vec<u8>> {
        let leads = self.list().await?;
        leads_to_csv(&leads)
    }
}

/// Serialize leads into CSV with the admin table's export columns.
fn leads_to_csv(leads: &[ContactMessage]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "Name",
            "Email",
            "Phone",
            "Event Date",
            "Design ID",
            "Message",
            "Created At",
        ])
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for lead in leads {
        writer
            .write_record([
                lead.name.as_str(),
                lead.email.as_str(),
                lead.phone.as_deref().unwrap_or(""),
                lead.event_date.as_deref().unwrap_or(""),
                lead.design_id.as_deref().unwrap_or(""),
                lead.message.as_str(),
                &lead.created_at.to_rfc3339(),
            ])
            .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finish CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use uuid::Uuid;

    fn fake_lead(phone: Option<&str>) -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: phone.map(|p| p.to_string()),
            event_date: Some("2026-09-12".to_string()),
            design_id: Some("FLORAL-001".to_string()),
            message: "Quote please".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_lead() {
        let leads = vec![fake_lead(Some("+15550100")), fake_lead(None)];
        let bytes = leads_to_csv(&leads).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Name,Email,Phone,Event Date,Design ID,Message,Created At"
        );
        assert!(lines[1].contains("+15550100"));
        assert!(lines[2].contains("FLORAL-001"));
    }

    #[test]
    fn empty_export_is_header_only() {
        let bytes = leads_to_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
