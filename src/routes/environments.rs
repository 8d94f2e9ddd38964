//! Environment gallery routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::Deleted;
use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireEditor;
use crate::models::environment::{CreateEnvironment, Environment, UpdateEnvironment};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::environment as environment_service;
use crate::AppState;

/// GET /api/v1/environments
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<Environment>>>, AppError> {
    let result = environment_service::list(&state.db, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/environments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Environment>>, AppError> {
    let environment = environment_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(environment))
}

/// POST /api/v1/environments
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(body): Json<CreateEnvironment>,
) -> Result<Json<ApiResponse<Environment>>, AppError> {
    let environment = environment_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(environment))
}

/// PUT /api/v1/environments/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEnvironment>,
) -> Result<Json<ApiResponse<Environment>>, AppError> {
    let environment = environment_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(environment))
}

/// DELETE /api/v1/environments/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, AppError> {
    environment_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success(Deleted { id }))
}
