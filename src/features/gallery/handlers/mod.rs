pub mod gallery_handler;

pub use gallery_handler::{
    __path_create_gallery_item, __path_delete_gallery_item, __path_get_gallery_item,
    __path_list_gallery, __path_presign_upload, __path_upload_gallery_item, create_gallery_item,
    delete_gallery_item, get_gallery_item, list_gallery, presign_upload, upload_gallery_item,
    GalleryState,
};
