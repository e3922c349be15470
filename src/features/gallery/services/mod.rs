mod design_id_service;
mod gallery_service;
mod image_urls;

pub use design_id_service::DesignIdService;
pub use gallery_service::GalleryService;
pub use image_urls::resolve_image_urls;
