//! Environment gallery service: facility photos in display order.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::environment::{CreateEnvironment, Environment, UpdateEnvironment};
use crate::models::pagination::{PagedResult, Pagination};

pub async fn create(pool: &PgPool, input: &CreateEnvironment) -> Result<Environment, AppError> {
    input.validate()?;

    let environment = sqlx::query_as::<_, Environment>(
        r#"
        INSERT INTO environments (title, description, image_url, sort_order)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.image_url)
    .bind(input.sort_order)
    .fetch_one(pool)
    .await?;

    tracing::info!(environment_id = %environment.id, "Environment photo created");
    Ok(environment)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Environment, AppError> {
    sqlx::query_as::<_, Environment>("SELECT * FROM environments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("找不到環境照片".to_string()))
}

/// List photos in gallery order; ties fall back to upload order.
pub async fn list(
    pool: &PgPool,
    pagination: &Pagination,
) -> Result<PagedResult<Environment>, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM environments")
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, Environment>(
        "SELECT * FROM environments ORDER BY sort_order ASC, created_at ASC LIMIT $1 OFFSET $2",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &UpdateEnvironment,
) -> Result<Environment, AppError> {
    input.validate()?;

    sqlx::query_as::<_, Environment>(
        r#"
        UPDATE environments SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            image_url = COALESCE($4, image_url),
            sort_order = COALESCE($5, sort_order),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.image_url)
    .bind(input.sort_order)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("找不到環境照片".to_string()))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM environments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("找不到環境照片".to_string()));
    }

    tracing::info!(environment_id = %id, "Environment photo deleted");
    Ok(())
}
