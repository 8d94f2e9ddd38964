//! Puppy listing routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::Deleted;
use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireEditor;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::puppy::{CreatePuppy, Puppy, UpdatePuppy};
use crate::services::puppy::{self as puppy_service, PuppyFilters};
use crate::AppState;

/// GET /api/v1/puppies
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<PuppyFilters>,
) -> Result<Json<ApiResponse<PagedResult<Puppy>>>, AppError> {
    let result = puppy_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/puppies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Puppy>>, AppError> {
    let puppy = puppy_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(puppy))
}

/// POST /api/v1/puppies
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(body): Json<CreatePuppy>,
) -> Result<Json<ApiResponse<Puppy>>, AppError> {
    let puppy = puppy_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(puppy))
}

/// PUT /api/v1/puppies/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePuppy>,
) -> Result<Json<ApiResponse<Puppy>>, AppError> {
    let puppy = puppy_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(puppy))
}

/// DELETE /api/v1/puppies/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, AppError> {
    puppy_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success(Deleted { id }))
}
