mod gallery_image;

pub use gallery_image::{Category, GalleryImage};
