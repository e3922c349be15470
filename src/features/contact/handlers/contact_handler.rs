use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AdminSession;
use crate::features::contact::dtos::{
    CloseLeadDto, CloseLeadResponseDto, CreateContactMessageDto, LeadResponseDto,
};
use crate::features::contact::services::ContactService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a contact message
///
/// Public endpoint behind the contact form; creates a lead.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactMessageDto,
    responses(
        (status = 201, description = "Message received", body = ApiResponse<LeadResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "contact"
)]
pub async fn create_contact_message(
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<CreateContactMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<LeadResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(message.into()),
            Some("Message sent".to_string()),
            None,
        )),
    ))
}

/// List leads
///
/// Admin endpoint; newest first.
#[utoipa::path(
    get,
    path = "/api/contact",
    responses(
        (status = 200, description = "List of leads", body = ApiResponse<Vec<LeadResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "contact"
)]
pub async fn list_leads(
    _session: AdminSession,
    State(service): State<Arc<ContactService>>,
) -> Result<Json<ApiResponse<Vec<LeadResponseDto>>>> {
    let leads = service.list().await?;

    let total = leads.len() as i64;
    let dtos: Vec<LeadResponseDto> = leads.into_iter().map(|l| l.into()).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Close lead(s) by phone number
#[utoipa::path(
    delete,
    path = "/api/contact",
    request_body = CloseLeadDto,
    responses(
        (status = 200, description = "Lead(s) closed", body = ApiResponse<CloseLeadResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No lead with that phone number")
    ),
    security(("bearer_auth" = [])),
    tag = "contact"
)]
pub async fn close_lead(
    _session: AdminSession,
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<CloseLeadDto>,
) -> Result<Json<ApiResponse<CloseLeadResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let closed = service.close_by_phone(&dto.phone).await?;

    Ok(Json(ApiResponse::success(
        Some(CloseLeadResponseDto { closed }),
        Some("Lead closed".to_string()),
        None,
    )))
}

/// Export leads as CSV
///
/// Admin endpoint; downloads the full lead list as a CSV attachment.
#[utoipa::path(
    get,
    path = "/api/contact/export",
    responses(
        (status = 200, description = "CSV document", body = String, content_type = "text/csv"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "contact"
)]
pub async fn export_leads(
    _session: AdminSession,
    State(service): State<Arc<ContactService>>,
) -> Result<Response> {
    let csv = service.export_csv().await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"leads.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
