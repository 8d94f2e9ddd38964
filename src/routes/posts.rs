//! Diary post routes. Reads are public; writes need an editor.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::Deleted;
use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireEditor;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::post::{CreatePost, Post, UpdatePost};
use crate::services::post::{self as post_service, PostFilters};
use crate::AppState;

/// GET /api/v1/posts
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<PostFilters>,
) -> Result<Json<ApiResponse<PagedResult<Post>>>, AppError> {
    let result = post_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = post_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(post))
}

/// POST /api/v1/posts
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    Json(body): Json<CreatePost>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = post_service::create(&state.db, editor.id, &body).await?;
    Ok(ApiResponse::success(post))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePost>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = post_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(post))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, AppError> {
    post_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success(Deleted { id }))
}
