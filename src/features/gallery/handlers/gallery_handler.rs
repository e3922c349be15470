use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::config::CdnConfig;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AdminSession;
use crate::features::gallery::dtos::{
    get_extension_for_image, is_image_content_type, CreateGalleryItemDto,
    DeleteGalleryItemResponseDto, GalleryImageResponseDto, GalleryListQuery,
    PresignUploadRequestDto, PresignUploadResponseDto, MAX_IMAGE_SIZE,
};
use crate::features::gallery::models::Category;
use crate::features::gallery::services::GalleryService;
use crate::modules::storage::ObjectStore;
use crate::shared::types::{ApiResponse, Meta};

/// State for gallery handlers
#[derive(Clone)]
pub struct GalleryState {
    pub gallery_service: Arc<GalleryService>,
    pub object_store: Arc<ObjectStore>,
    pub cdn: CdnConfig,
}

/// List gallery images
///
/// Public endpoint. Optionally filtered by exact category or by a
/// case-insensitive substring search over design id, title and keywords.
/// Always ordered newest-first.
#[utoipa::path(
    get,
    path = "/api/gallery",
    params(GalleryListQuery),
    responses(
        (status = 200, description = "List of gallery images", body = ApiResponse<Vec<GalleryImageResponseDto>>)
    ),
    tag = "gallery"
)]
pub async fn list_gallery(
    State(state): State<GalleryState>,
    Query(query): Query<GalleryListQuery>,
) -> Result<Json<ApiResponse<Vec<GalleryImageResponseDto>>>> {
    let category = query.category_filter().map_err(AppError::BadRequest)?;
    let images = state
        .gallery_service
        .list(category, query.search.as_deref())
        .await?;

    let total = images.len() as i64;
    let dtos: Vec<GalleryImageResponseDto> = images
        .into_iter()
        .map(|image| GalleryImageResponseDto::from_model(image, &state.cdn))
        .collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a gallery image by design id
#[utoipa::path(
    get,
    path = "/api/gallery/{design_id}",
    params(
        ("design_id" = String, Path, description = "Design id, e.g. FLORAL-001")
    ),
    responses(
        (status = 200, description = "Gallery image found", body = ApiResponse<GalleryImageResponseDto>),
        (status = 404, description = "Image not found")
    ),
    tag = "gallery"
)]
pub async fn get_gallery_item(
    State(state): State<GalleryState>,
    Path(design_id): Path<String>,
) -> Result<Json<ApiResponse<GalleryImageResponseDto>>> {
    let image = state.gallery_service.get_by_design_id(&design_id).await?;

    Ok(Json(ApiResponse::success(
        Some(GalleryImageResponseDto::from_model(image, &state.cdn)),
        None,
        None,
    )))
}

/// Create a gallery record from pre-uploaded object keys
///
/// The keys come from presigned uploads; the record references all of them as
/// one gallery item and receives a freshly allocated design id.
#[utoipa::path(
    post,
    path = "/api/gallery",
    request_body = CreateGalleryItemDto,
    responses(
        (status = 201, description = "Gallery record created", body = ApiResponse<GalleryImageResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "gallery"
)]
pub async fn create_gallery_item(
    _session: AdminSession,
    State(state): State<GalleryState>,
    AppJson(dto): AppJson<CreateGalleryItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<GalleryImageResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let image = state.gallery_service.create_with_keys(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(GalleryImageResponseDto::from_model(image, &state.cdn)),
            Some("Gallery item created".to_string()),
            None,
        )),
    ))
}

/// Upload a single image and create its gallery record
///
/// Accepts multipart/form-data with:
/// - `image`: The image file (required)
/// - `category`: "birthdays", "weddings" or "corporate" (required)
/// - `title`: Display title (required)
/// - `keywords`: Comma or whitespace separated keywords (optional)
#[utoipa::path(
    post,
    path = "/api/gallery/upload",
    request_body(
        content = crate::features::gallery::dtos::UploadGalleryItemDto,
        content_type = "multipart/form-data",
        description = "Single-file upload form",
    ),
    responses(
        (status = 201, description = "Gallery record created", body = ApiResponse<GalleryImageResponseDto>),
        (status = 400, description = "Invalid file or validation error"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "File too large")
    ),
    security(("bearer_auth" = [])),
    tag = "gallery"
)]
pub async fn upload_gallery_item(
    _session: AdminSession,
    State(state): State<GalleryState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<GalleryImageResponseDto>>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut category: Option<String> = None;
    let mut title: Option<String> = None;
    let mut keywords = String::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "category" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read category field: {}", e))
                })?;
                category = Some(text);
            }
            "title" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read title field: {}", e))
                })?;
                title = Some(text);
            }
            "keywords" => {
                keywords = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read keywords field: {}", e))
                })?;
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("No image file provided".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;
    let category_text =
        category.ok_or_else(|| AppError::BadRequest("Category is required".to_string()))?;
    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;

    let category = Category::from_str(&category_text).map_err(AppError::BadRequest)?;

    if file_data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            MAX_IMAGE_SIZE,
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    if !is_image_content_type(&content_type) {
        return Err(AppError::BadRequest(
            "Only image files are allowed".to_string(),
        ));
    }

    let extension = get_extension_for_image(&content_type, &file_name);
    let image = state
        .gallery_service
        .create_from_upload(
            file_data,
            &extension,
            &content_type,
            category,
            &title,
            &keywords,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(GalleryImageResponseDto::from_model(image, &state.cdn)),
            Some("Image uploaded".to_string()),
            None,
        )),
    ))
}

/// Issue a presigned upload target
///
/// Returns a time-limited PUT URL plus the object key the client must echo
/// back when creating the gallery record.
#[utoipa::path(
    post,
    path = "/api/gallery/presign-upload",
    request_body = PresignUploadRequestDto,
    responses(
        (status = 200, description = "Presigned upload target", body = ApiResponse<PresignUploadResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "gallery"
)]
pub async fn presign_upload(
    _session: AdminSession,
    State(state): State<GalleryState>,
    AppJson(dto): AppJson<PresignUploadRequestDto>,
) -> Result<Json<ApiResponse<PresignUploadResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !is_image_content_type(&dto.content_type) {
        return Err(AppError::BadRequest(
            "Only image files are allowed".to_string(),
        ));
    }

    let extension = get_extension_for_image(&dto.content_type, &dto.filename);
    let object_key = state.object_store.generate_image_key(&extension);
    let upload_url = state.object_store.presign_put(&object_key).await?;

    Ok(Json(ApiResponse::success(
        Some(PresignUploadResponseDto {
            upload_url,
            object_key,
        }),
        None,
        None,
    )))
}

/// Delete a gallery image
///
/// Removes the database record and every storage object it references.
#[utoipa::path(
    delete,
    path = "/api/gallery/{design_id}",
    params(
        ("design_id" = String, Path, description = "Design id, e.g. FLORAL-001")
    ),
    responses(
        (status = 200, description = "Image deleted", body = ApiResponse<DeleteGalleryItemResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "gallery"
)]
pub async fn delete_gallery_item(
    _session: AdminSession,
    State(state): State<GalleryState>,
    Path(design_id): Path<String>,
) -> Result<Json<ApiResponse<DeleteGalleryItemResponseDto>>> {
    state.gallery_service.delete(&design_id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteGalleryItemResponseDto { deleted: true }),
        Some("Image deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::{routing::post, Router};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use super::*;
    use crate::core::config::StorageConfig;
    use crate::features::gallery::services::DesignIdService;
    use crate::shared::test_helpers::{lazy_test_pool, with_admin_session};

    fn test_state() -> GalleryState {
        let pool = lazy_test_pool();
        let object_store = Arc::new(
            ObjectStore::new(StorageConfig {
                endpoint: "http://localhost:9000".to_string(),
                public_endpoint: "http://localhost:9000".to_string(),
                access_key: "minioadmin".to_string(),
                secret_key: "minioadmin".to_string(),
                bucket: "decora-gallery".to_string(),
                region: "us-east-1".to_string(),
                public_prefix: "public".to_string(),
                presigned_url_expiry_secs: 900,
            })
            .unwrap(),
        );
        let design_ids = Arc::new(DesignIdService::new(pool.clone()));
        let gallery_service = Arc::new(GalleryService::new(
            pool,
            Arc::clone(&object_store),
            design_ids,
        ));

        GalleryState {
            gallery_service,
            object_store,
            cdn: CdnConfig::default(),
        }
    }

    fn presign_router() -> Router {
        Router::new()
            .route("/api/gallery/presign-upload", post(presign_upload))
            .with_state(test_state())
    }

    #[tokio::test]
    async fn presign_returns_signed_target_and_key() {
        let server = TestServer::new(with_admin_session(presign_router())).unwrap();

        let response = server
            .post("/api/gallery/presign-upload")
            .json(&json!({"filename": "arch.jpg", "contentType": "image/jpeg"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let key = body["data"]["objectKey"].as_str().unwrap();
        let url = body["data"]["uploadUrl"].as_str().unwrap();

        assert!(key.starts_with("public/gallery/"));
        assert!(key.ends_with(".jpg"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn presign_rejects_non_image_content_type() {
        let server = TestServer::new(with_admin_session(presign_router())).unwrap();

        let response = server
            .post("/api/gallery/presign-upload")
            .json(&json!({"filename": "doc.pdf", "contentType": "application/pdf"}))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn presign_without_session_is_401() {
        let server = TestServer::new(presign_router()).unwrap();

        let response = server
            .post("/api/gallery/presign-upload")
            .json(&json!({"filename": "arch.jpg", "contentType": "image/jpeg"}))
            .await;

        response.assert_status_unauthorized();
    }
}
