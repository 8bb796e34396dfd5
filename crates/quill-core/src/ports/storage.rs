//! Uploaded image storage port.

use async_trait::async_trait;

use crate::error::StorageError;

/// Stores uploaded images by filename.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under `filename`, replacing any previous file.
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Scale the stored image to `width` pixels wide, keeping its aspect ratio
    /// and format. The file is replaced only once the resized copy is complete.
    async fn resize_to_width(&self, filename: &str, width: u32) -> Result<(), StorageError>;
}
