//! Image Storage 适配器

mod image_storage;

pub use image_storage::FileImageStorage;
