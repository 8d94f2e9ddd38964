//! Kennel member routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::Deleted;
use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireEditor;
use crate::models::member::{CreateMember, Member, UpdateMember};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::member::{self as member_service, MemberFilters};
use crate::AppState;

/// GET /api/v1/members
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<MemberFilters>,
) -> Result<Json<ApiResponse<PagedResult<Member>>>, AppError> {
    let result = member_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Member>>, AppError> {
    let member = member_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(member))
}

/// POST /api/v1/members
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(body): Json<CreateMember>,
) -> Result<Json<ApiResponse<Member>>, AppError> {
    let member = member_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(member))
}

/// PUT /api/v1/members/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMember>,
) -> Result<Json<ApiResponse<Member>>, AppError> {
    let member = member_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(member))
}

/// DELETE /api/v1/members/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deleted>>, AppError> {
    member_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success(Deleted { id }))
}
