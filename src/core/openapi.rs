use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::contact::{dtos as contact_dtos, handlers as contact_handlers};
use crate::features::gallery::{
    dtos as gallery_dtos, handlers as gallery_handlers, models as gallery_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Admin session
        auth_handlers::login,
        // Gallery
        gallery_handlers::list_gallery,
        gallery_handlers::get_gallery_item,
        gallery_handlers::create_gallery_item,
        gallery_handlers::upload_gallery_item,
        gallery_handlers::presign_upload,
        gallery_handlers::delete_gallery_item,
        // Contact
        contact_handlers::create_contact_message,
        contact_handlers::list_leads,
        contact_handlers::close_lead,
        contact_handlers::export_leads,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Admin session
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // Gallery
            gallery_models::Category,
            gallery_dtos::CreateGalleryItemDto,
            gallery_dtos::UploadGalleryItemDto,
            gallery_dtos::PresignUploadRequestDto,
            gallery_dtos::PresignUploadResponseDto,
            gallery_dtos::GalleryImageResponseDto,
            gallery_dtos::DeleteGalleryItemResponseDto,
            ApiResponse<Vec<gallery_dtos::GalleryImageResponseDto>>,
            ApiResponse<gallery_dtos::GalleryImageResponseDto>,
            ApiResponse<gallery_dtos::PresignUploadResponseDto>,
            ApiResponse<gallery_dtos::DeleteGalleryItemResponseDto>,
            // Contact
            contact_dtos::CreateContactMessageDto,
            contact_dtos::LeadResponseDto,
            contact_dtos::CloseLeadDto,
            contact_dtos::CloseLeadResponseDto,
            ApiResponse<contact_dtos::LeadResponseDto>,
            ApiResponse<Vec<contact_dtos::LeadResponseDto>>,
            ApiResponse<contact_dtos::CloseLeadResponseDto>,
        )
    ),
    tags(
        (name = "gallery", description = "Public gallery browsing and admin uploads"),
        (name = "contact", description = "Contact form and lead management"),
        (name = "admin", description = "Admin session"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Decora API",
        version = "0.1.0",
        description = "API documentation for the Decora gallery and leads backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
