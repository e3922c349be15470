mod gallery_dto;

pub use gallery_dto::{
    get_extension_for_image, is_image_content_type, parse_keywords, CreateGalleryItemDto,
    DeleteGalleryItemResponseDto, GalleryImageResponseDto, GalleryListQuery,
    PresignUploadRequestDto, PresignUploadResponseDto, UploadGalleryItemDto, MAX_IMAGE_SIZE,
};
