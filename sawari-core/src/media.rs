use serde::{Deserialize, Serialize};

/// An image staged for upload (payment screenshot or driver QR code).
///
/// Bytes live in memory only for the duration of the submission; nothing is
/// persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Mirrors the `accept="image/*"` pick constraint: any image type goes.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Resolve a stored screenshot path against the configured image base URL.
pub fn resolve_image_url(image_base_url: &str, stored_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        stored_path.trim_start_matches('/')
    )
}
