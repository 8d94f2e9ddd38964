//! Photo upload route (editor+, multipart).

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireEditor;
use crate::services::upload::{self as upload_service, StoredUpload};
use crate::AppState;

/// POST /api/v1/uploads: store one client-compressed image from the `file` field.
pub async fn upload(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<StoredUpload>>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("缺少檔案類型".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        let stored = upload_service::store_image(
            Path::new(&state.config.upload_dir),
            &content_type,
            &data,
            state.config.max_upload_bytes,
        )
        .await?;

        tracing::info!(user_id = %editor.id, file = %stored.file_name, "Photo uploaded");
        return Ok(ApiResponse::success(stored));
    }

    Err(AppError::Validation(
        "Missing 'file' field in multipart request".to_string(),
    ))
}
