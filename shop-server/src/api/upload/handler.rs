//! Image Upload Handler
//!
//! Accepts a multipart image from an authenticated user, stores it in
//! the object bucket under a date-prefixed random key and returns the
//! public URL for the `images` field.

use axum::{
    Json,
    extract::{Multipart, State},
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
    pub size: usize,
}

fn extension_of(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| SUPPORTED_FORMATS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// POST /api/upload - 上传图片
pub async fn upload(
    _user: CurrentUser,
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<UploadResponse>>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let ext = extension_of(&filename)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unsupported file type, expected one of: {}",
                    SUPPORTED_FORMATS.join(", ")
                ))
            })?
            .to_ascii_lowercase();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::validation("Empty file"));
        }
        if bytes.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large: {} bytes (max {})",
                bytes.len(),
                MAX_FILE_SIZE
            )));
        }

        let key = format!("{}/{}.{ext}", Utc::now().format("%Y/%m"), Uuid::new_v4());
        let size = bytes.len();
        state.storage.store(&key, bytes.to_vec(), &content_type).await?;
        let url = state.storage.public_url(&key);
        tracing::info!(%key, size, "image uploaded");

        return Ok(ok(UploadResponse { key, url, size }));
    }

    Err(AppError::validation("Missing 'file' field in multipart body"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_whitelist() {
        assert_eq!(extension_of("photo.JPG"), Some("JPG"));
        assert_eq!(extension_of("photo.webp"), Some("webp"));
        assert_eq!(extension_of("notes.txt"), None);
        assert_eq!(extension_of("noext"), None);
    }
}
