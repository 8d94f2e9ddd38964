//! Diary post service: CRUD with published/search filters.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::post::{CreatePost, Post, UpdatePost};

/// Filters for listing posts.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PostFilters {
    pub published: Option<bool>,
    pub search: Option<String>,
}

/// Create a new post authored by `author`.
pub async fn create(pool: &PgPool, author: Uuid, input: &CreatePost) -> Result<Post, AppError> {
    input.validate()?;

    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, content, cover_image_url, published, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.cover_image_url)
    .bind(input.published)
    .bind(author)
    .fetch_one(pool)
    .await?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok(post)
}

/// Find a post by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Post, AppError> {
    sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("找不到文章".to_string()))
}

/// List posts newest first.
pub async fn list(
    pool: &PgPool,
    filters: &PostFilters,
    pagination: &Pagination,
) -> Result<PagedResult<Post>, AppError> {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_index = 0u32;

    if filters.published.is_some() {
        param_index += 1;
        conditions.push(format!("published = ${param_index}"));
    }
    if filters.search.is_some() {
        param_index += 1;
        conditions.push(format!(
            "(title ILIKE ${param_index} OR content ILIKE ${param_index})"
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM posts {where_clause}");
    let data_sql = format!(
        "SELECT * FROM posts {where_clause} ORDER BY created_at DESC LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, Post>(&data_sql);

    if let Some(published) = filters.published {
        count_query = count_query.bind(published);
        data_query = data_query.bind(published);
    }
    if let Some(ref search) = filters.search {
        let pattern = format!("%{search}%");
        count_query = count_query.bind(pattern.clone());
        data_query = data_query.bind(pattern);
    }

    let total = count_query.fetch_one(pool).await?;
    let items = data_query.fetch_all(pool).await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Update a post; absent fields keep their current value.
pub async fn update(pool: &PgPool, id: Uuid, input: &UpdatePost) -> Result<Post, AppError> {
    input.validate()?;

    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts SET
            title = COALESCE($2, title),
            content = COALESCE($3, content),
            cover_image_url = COALESCE($4, cover_image_url),
            published = COALESCE($5, published),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.cover_image_url)
    .bind(input.published)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("找不到文章".to_string()))
}

/// Delete a post.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("找不到文章".to_string()));
    }

    tracing::info!(post_id = %id, "Post deleted");
    Ok(())
}
