//! Staff sign-in and profile routes.

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserResponse;
use crate::services::auth::{self as auth_service, StaffSession};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<ApiResponse<StaffSession>>, AppError> {
    body.validate()?;
    let session =
        auth_service::sign_in(&state.db, &state.config, &body.username, &body.password).await?;
    Ok(ApiResponse::success(session))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let staff = auth_service::load_staff(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(UserResponse::from(staff)))
}
