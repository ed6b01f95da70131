//! Application constants and configuration

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed category set, in display order. Records keep whatever category
/// string they were uploaded under, even if it no longer appears here.
pub const CATEGORIES: [&str; 5] = ["REALITY", "CONSTRUCT", "ZION", "MISSIONS", "ARCHIVES"];

/// File name of the durable slot holding the serialized gallery.
pub const GALLERY_FILE: &str = "gallery.json";

/// Minimum horizontal drag (logical points) to register a lightbox swipe.
pub const SWIPE_THRESHOLD: f32 = 40.0;

/// File extensions accepted by the upload picker.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];
