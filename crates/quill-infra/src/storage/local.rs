//! Local-disk image store.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::imageops::FilterType;
use img_parts::{Bytes, DynImage, ImageEXIF, ImageICC};

use quill_core::error::StorageError;
use quill_core::ports::ImageStore;

/// Stores uploads as plain files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of `filename` inside the root. Only the final path component is kept.
    fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| StorageError::UnsupportedImage(filename.to_string()))?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(filename)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), "Stored upload");
        Ok(())
    }

    async fn resize_to_width(&self, filename: &str, width: u32) -> Result<(), StorageError> {
        let path = self.path_for(filename)?;
        let original = tokio::fs::read(&path).await?;

        let resized = tokio::task::spawn_blocking(move || resize(&original, width))
            .await
            .map_err(|e| StorageError::Processing(e.to_string()))??;

        // Write beside the original and swap, so readers never see a partial file.
        let mut partial = path.clone().into_os_string();
        partial.push(".resizing");
        let partial = PathBuf::from(partial);

        tokio::fs::write(&partial, resized).await?;
        tokio::fs::rename(&partial, &path).await?;

        tracing::debug!(path = %path.display(), width, "Resized upload");
        Ok(())
    }
}

/// Scale `bytes` to `width` pixels wide, re-encoding in the source format.
fn resize(bytes: &[u8], width: u32) -> Result<Vec<u8>, StorageError> {
    let format =
        image::guess_format(bytes).map_err(|e| StorageError::UnsupportedImage(e.to_string()))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| StorageError::UnsupportedImage(e.to_string()))?;

    let resized = img.resize(width, u32::MAX, FilterType::Lanczos3);

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, format)
        .map_err(|e| StorageError::Processing(e.to_string()))?;

    copy_metadata(bytes, out.into_inner())
}

/// Carry EXIF and ICC data from `original` into the re-encoded `encoded`.
///
/// Formats without metadata containers (GIF) pass through unchanged.
fn copy_metadata(original: &[u8], encoded: Vec<u8>) -> Result<Vec<u8>, StorageError> {
    let metadata_error = |e: img_parts::Error| StorageError::Processing(e.to_string());

    let Some(source) =
        DynImage::from_bytes(Bytes::copy_from_slice(original)).map_err(metadata_error)?
    else {
        return Ok(encoded);
    };
    let (exif, icc) = (source.exif(), source.icc_profile());
    if exif.is_none() && icc.is_none() {
        return Ok(encoded);
    }

    let encoded = Bytes::from(encoded);
    let Some(mut target) = DynImage::from_bytes(encoded.clone()).map_err(metadata_error)? else {
        return Ok(encoded.to_vec());
    };
    target.set_exif(exif);
    target.set_icc_profile(icc);

    Ok(target.encoder().bytes().to_vec())
}
