//! Naming rules for uploaded images.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Extensions accepted for post images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Storage name for an upload: the upload time in milliseconds plus the
/// original extension, lowercased.
pub fn upload_filename(original: &str, now: DateTime<Utc>) -> Result<String, DomainError> {
    let extension = Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "img must be one of: {}",
                IMAGE_EXTENSIONS.join(", ")
            ))
        })?;

    Ok(format!("{}.{}", now.timestamp_millis(), extension))
}
