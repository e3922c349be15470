use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::config::CdnConfig;
use crate::features::gallery::models::{Category, GalleryImage};
use crate::features::gallery::services::resolve_image_urls;

/// Maximum accepted image size in bytes (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Query parameters for the public gallery listing
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GalleryListQuery {
    /// Exact category filter; "all" (the browser's default tab) means no
    /// filter
    pub category: Option<String>,
    /// Free-text search over design id, title and keywords
    pub search: Option<String>,
}

impl GalleryListQuery {
    /// Resolve the raw category parameter. "all" and absence both mean no
    /// filter; anything else must be a known category.
    pub fn category_filter(&self) -> Result<Option<Category>, String> {
        match self.category.as_deref() {
            None | Some("all") | Some("") => Ok(None),
            Some(other) => other.parse().map(Some),
        }
    }
}

/// Request DTO for creating a gallery record from pre-uploaded object keys
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItemDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Object-storage keys collected from presigned uploads, in display order
    #[validate(length(min = 1, message = "At least one image key is required"))]
    pub image_keys: Vec<String>,
}

/// Multipart upload form for OpenAPI documentation.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadGalleryItemDto {
    /// The image to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    /// Category: "birthdays", "weddings" or "corporate"
    #[schema(example = "weddings")]
    pub category: String,
    #[schema(example = "Rose arch with drapes")]
    pub title: String,
    /// Comma or whitespace separated keywords
    #[schema(example = "stage, flowers, decor")]
    pub keywords: Option<String>,
}

/// Request DTO for presigned upload issuance
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignUploadRequestDto {
    #[validate(length(min = 1, message = "filename is required"))]
    pub filename: String,
    #[validate(length(min = 1, message = "contentType is required"))]
    pub content_type: String,
}

/// Response DTO for presigned upload issuance
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignUploadResponseDto {
    /// Time-limited PUT target for the binary upload
    pub upload_url: String,
    /// Key the object will live under once uploaded
    pub object_key: String,
}

/// Response DTO for gallery records
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageResponseDto {
    pub id: Uuid,
    pub design_id: String,
    pub title: String,
    pub category: String,
    pub keywords: Vec<String>,
    /// Raw object-storage keys, in display order
    pub image_keys: Vec<String>,
    /// Keys resolved against the configured CDN base (placeholder when empty)
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl GalleryImageResponseDto {
    pub fn from_model(image: GalleryImage, cdn: &CdnConfig) -> Self {
        let image_urls = resolve_image_urls(&image.image_keys, cdn.base_url.as_deref());
        Self {
            id: image.id,
            design_id: image.design_id,
            title: image.title,
            category: image.category,
            keywords: split_keywords(&image.keywords),
            image_keys: image.image_keys,
            image_urls,
            created_at: image.created_at,
        }
    }
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteGalleryItemResponseDto {
    /// Confirmation that the record and its objects were deleted
    pub deleted: bool,
}

/// Split free-form keyword input on commas and whitespace, dropping empties.
pub fn parse_keywords(value: &str) -> Vec<String> {
    value
        .split([',', ' ', '\t', '\n'])
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| k.to_string())
        .collect()
}

/// Split the comma-joined storage form back into a list.
fn split_keywords(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| k.to_string())
        .collect()
}

/// Accepts any image MIME type, mirroring the upload filter of the public
/// site (only images make it into the gallery).
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Pick a file extension for a stored image, preferring the MIME type and
/// falling back to the uploaded filename.
pub fn get_extension_for_image(content_type: &str, filename: &str) -> String {
    match content_type {
        "image/jpeg" => "jpg".to_string(),
        "image/png" => "png".to_string(),
        "image/gif" => "gif".to_string(),
        "image/webp" => "webp".to_string(),
        _ => filename
            .rsplit('.')
            .next()
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
            .unwrap_or("bin")
            .to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keywords_splits_on_commas_and_whitespace() {
        assert_eq!(
            parse_keywords("stage, flowers  decor,,"),
            vec!["stage", "flowers", "decor"]
        );
        assert!(parse_keywords("   ").is_empty());
    }

    #[test]
    fn split_keywords_round_trips_the_stored_form() {
        assert_eq!(
            split_keywords("stage, flowers, decor"),
            vec!["stage", "flowers", "decor"]
        );
        assert!(split_keywords("").is_empty());
    }

    #[test]
    fn category_filter_treats_all_as_no_filter() {
        let mut query = GalleryListQuery::default();
        assert_eq!(query.category_filter().unwrap(), None);

        query.category = Some("all".to_string());
        assert_eq!(query.category_filter().unwrap(), None);

        query.category = Some("weddings".to_string());
        assert_eq!(query.category_filter().unwrap(), Some(Category::Weddings));

        query.category = Some("galas".to_string());
        assert!(query.category_filter().is_err());
    }

    #[test]
    fn image_content_types() {
        assert!(is_image_content_type("image/jpeg"));
        assert!(is_image_content_type("image/webp"));
        assert!(!is_image_content_type("application/pdf"));
    }

    #[test]
    fn extension_prefers_mime_then_filename() {
        assert_eq!(get_extension_for_image("image/jpeg", "photo.PNG"), "jpg");
        assert_eq!(get_extension_for_image("image/x-tiff", "scan.TIFF"), "tiff");
        assert_eq!(get_extension_for_image("image/x-unknown", "noext"), "noext");
        assert_eq!(get_extension_for_image("image/x-unknown", ""), "bin");
    }
}
