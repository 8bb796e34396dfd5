//! Image upload handler.

use std::sync::Arc;

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;

use quill_core::ports::ImageStore;
use quill_core::service::upload_filename;
use quill_shared::dto::UploadResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "img";

fn multipart_error(e: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart payload: {}", e))
}

async fn read_field(mut field: Field, max_bytes: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(AppError::BadRequest(format!(
                "Image exceeds the {} byte limit",
                max_bytes
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Resize in the background; the response does not wait for it.
fn spawn_resize(images: Arc<dyn ImageStore>, filename: String, width: u32) {
    tokio::spawn(async move {
        match images.resize_to_width(&filename, width).await {
            Ok(()) => tracing::debug!(filename = %filename, width, "Upload resized"),
            Err(e) => tracing::error!(filename = %filename, error = %e, "Failed to resize upload"),
        }
    });
}

/// POST /api/posts/upload
pub async fn upload(state: web::Data<AppState>, mut payload: Multipart) -> AppResult<HttpResponse> {
    while let Some(field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let original = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let filename = upload_filename(&original, chrono::Utc::now())?;

        let bytes = read_field(field, state.upload.max_bytes).await?;
        state.images.store(&filename, bytes).await?;
        tracing::info!(filename = %filename, original = %original, "Upload stored");

        spawn_resize(
            state.images.clone(),
            filename.clone(),
            state.upload.resize_width,
        );

        return Ok(HttpResponse::Ok().json(UploadResponse { filename }));
    }

    Err(AppError::BadRequest(format!(
        "Multipart field `{}` is required",
        IMAGE_FIELD
    )))
}
