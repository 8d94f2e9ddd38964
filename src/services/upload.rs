//! Photo upload storage.
//!
//! Images arrive already resized and compressed by the browser. This module
//! only checks that the bytes are what they claim to be and stores them
//! content-addressed, so re-uploading the same photo yields the same URL.

use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::AppError;

/// Public URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }

    /// Check the file signature against the declared format.
    pub fn matches_signature(&self, data: &[u8]) -> bool {
        match self {
            Self::Jpeg => data.starts_with(&[0xFF, 0xD8, 0xFF]),
            Self::Png => data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            Self::Gif => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
            Self::Webp => data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP",
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct StoredUpload {
    pub url: String,
    pub file_name: String,
    pub size: usize,
    pub content_type: String,
}

/// Validate an uploaded image and write it to `dir`.
pub async fn store_image(
    dir: &Path,
    content_type: &str,
    data: &[u8],
    max_bytes: usize,
) -> Result<StoredUpload, AppError> {
    let kind = ImageKind::from_content_type(content_type).ok_or_else(|| {
        AppError::Validation(format!("不支援的圖片格式: {content_type}"))
    })?;

    if data.is_empty() {
        return Err(AppError::Validation("檔案內容為空".to_string()));
    }
    if data.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "檔案過大，上限為 {max_bytes} bytes"
        )));
    }
    if !kind.matches_signature(data) {
        return Err(AppError::Validation(
            "檔案內容與宣告的圖片格式不符".to_string(),
        ));
    }

    let digest = hex::encode(Sha256::digest(data));
    let file_name = format!("{digest}.{}", kind.extension());
    let path = dir.join(&file_name);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {e}")))?;

    let exists = tokio::fs::try_exists(&path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to stat upload: {e}")))?;

    if exists {
        tracing::debug!(file = %file_name, "Upload already stored");
    } else {
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write upload: {e}")))?;
        tracing::info!(file = %file_name, size = data.len(), "Stored upload");
    }

    Ok(StoredUpload {
        url: format!("{PUBLIC_PREFIX}/{file_name}"),
        file_name,
        size: data.len(),
        content_type: kind.content_type().to_string(),
    })
}
