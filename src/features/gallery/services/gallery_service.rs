use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::gallery::dtos::{parse_keywords, CreateGalleryItemDto};
use crate::features::gallery::models::{Category, GalleryImage};
use crate::features::gallery::services::DesignIdService;
use crate::modules::storage::ObjectStore;

const SELECT_COLUMNS: &str =
    "id, design_id, title, category, keywords, image_keys, created_at";

/// Service for gallery operations
pub struct GalleryService {
    pool: PgPool,
    object_store: Arc<ObjectStore>,
    design_ids: Arc<DesignIdService>,
}

impl GalleryService {
    pub fn new(
        pool: PgPool,
        object_store: Arc<ObjectStore>,
        design_ids: Arc<DesignIdService>,
    ) -> Self {
        Self {
            pool,
            object_store,
            design_ids,
        }
    }

    /// List images newest-first, optionally filtered by exact category or by
    /// a case-insensitive substring search over design id, title and
    /// keywords. Search wins when both are supplied, mirroring the public
    /// site's behavior.
    pub async fn list(
        &self,
        category: Option<Category>,
        search: Option<&str>,
    ) -> Result<Vec<GalleryImage>> {
        let result = if let Some(query) = search.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", query);
            sqlx::query_as::<_, GalleryImage>(&format!(
                r#"
                SELECT {SELECT_COLUMNS}
                FROM gallery_images
                WHERE design_id ILIKE $1 OR title ILIKE $1 OR keywords ILIKE $1
                ORDER BY created_at DESC
                "#
            ))
            .bind(pattern)
            .fetch_all(&self.pool)
            .await
        } else if let Some(category) = category {
            sqlx::query_as::<_, GalleryImage>(&format!(
                r#"
                SELECT {SELECT_COLUMNS}
                FROM gallery_images
                WHERE category = $1
                ORDER BY created_at DESC
                "#
            ))
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, GalleryImage>(&format!(
                r#"
                SELECT {SELECT_COLUMNS}
                FROM gallery_images
                ORDER BY created_at DESC
                "#
            ))
            .fetch_all(&self.pool)
            .await
        };

        result.map_err(|e| {
            tracing::error!("Failed to list gallery images: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Fetch one image by its design id
    pub async fn get_by_design_id(&self, design_id: &str) -> Result<GalleryImage> {
        let image = sqlx::query_as::<_, GalleryImage>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM gallery_images
            WHERE design_id = $1
            "#
        ))
        .bind(design_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch gallery image: {:?}", e);
            AppError::Database(e)
        })?;

        image.ok_or_else(|| AppError::NotFound(format!("Image '{}' not found", design_id)))
    }

    /// Create a gallery record from object keys the client already uploaded
    /// through presigned URLs.
    pub async fn create_with_keys(&self, dto: CreateGalleryItemDto) -> Result<GalleryImage> {
        if dto.image_keys.iter().any(|k| k.trim().is_empty()) {
            return Err(AppError::BadRequest(
                "Image keys must be non-empty".to_string(),
            ));
        }

        let design_id = self.design_ids.generate(dto.category).await?;
        let keywords = dto.keywords.join(", ");

        self.insert(&design_id, &dto.title, dto.category, &keywords, &dto.image_keys)
            .await
    }

    /// Server-side single-file create: store the binary, then create the
    /// record referencing it.
    pub async fn create_from_upload(
        &self,
        data: Vec<u8>,
        extension: &str,
        content_type: &str,
        category: Category,
        title: &str,
        keywords_input: &str,
    ) -> Result<GalleryImage> {
        let object_key = self.object_store.generate_image_key(extension);
        self.object_store
            .upload(&object_key, data, content_type)
            .await?;

        debug!("Gallery image uploaded to storage: {}", object_key);

        let design_id = self.design_ids.generate(category).await?;
        let keywords = parse_keywords(keywords_input).join(", ");

        self.insert(&design_id, title, category, &keywords, &[object_key])
            .await
    }

    /// Delete a gallery record and every storage object it references.
    pub async fn delete(&self, design_id: &str) -> Result<()> {
        let image = self.get_by_design_id(design_id).await?;

        for key in &image.image_keys {
            // Objects may already be gone (manual cleanup, aborted uploads);
            // a missing object must not strand the record.
            if let Err(e) = self.object_store.delete(key).await {
                tracing::warn!("Failed to delete storage object '{}': {}", key, e);
            }
        }

        sqlx::query("DELETE FROM gallery_images WHERE design_id = $1")
            .bind(design_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete gallery image: {:?}", e);
                AppError::Database(e)
            })?;

        info!(
            "Gallery image deleted: design_id={}, objects={}",
            design_id,
            image.image_keys.len()
        );

        Ok(())
    }

    async fn insert(
        &self,
        design_id: &str,
        title: &str,
        category: Category,
        keywords: &str,
        image_keys: &[String],
    ) -> Result<GalleryImage> {
        let image = sqlx::query_as::<_, GalleryImage>(&format!(
            r#"
            INSERT INTO gallery_images (design_id, title, category, keywords, image_keys)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(design_id)
        .bind(title)
        .bind(category.as_str())
        .bind(keywords)
        .bind(image_keys)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert gallery image: {:?}", e);
            AppError::Database(e)
        })?;

        info!(
            "Gallery image created: design_id={}, category={}, images={}",
            image.design_id,
            image.category,
            image.image_keys.len()
        );

        Ok(image)
    }
}
