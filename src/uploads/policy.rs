use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static ALLOWED_IMAGE_TYPES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"jpeg|jpg|png|gif|webp").expect("valid image type pattern"));

#[derive(thiserror::Error, Debug)]
pub enum UploadRejected {
    #[error("Only image files (JPEG, JPG, PNG, GIF, WEBP) are allowed.")]
    InvalidType,

    #[error("File too large. Maximum size is {}MB.", megabytes(.max_bytes))]
    TooLarge { max_bytes: usize },

    #[error("Invalid form submission.")]
    Malformed(#[source] anyhow::Error),
}

// Rounded to one decimal place.
fn megabytes(bytes: &usize) -> f64 {
    (*bytes as f64 / 100_000.0).round() / 10.0
}

/// Both the extension and the declared content type have to name one of the
/// accepted image formats.
pub fn is_allowed_image(filename: &str, content_type: &str) -> bool {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    ALLOWED_IMAGE_TYPES.is_match(&extension) && ALLOWED_IMAGE_TYPES.is_match(content_type)
}
