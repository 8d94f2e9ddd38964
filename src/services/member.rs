//! Kennel member service: CRUD for the resident dogs.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::member::{CreateMember, Gender, Member, UpdateMember};
use crate::models::pagination::{PagedResult, Pagination};

/// Filters for listing members.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MemberFilters {
    pub gender: Option<Gender>,
    pub search: Option<String>,
}

/// Create a new member.
pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, AppError> {
    input.validate()?;

    let member = sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members (name, breed, gender, birth_date, description, photo_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.breed)
    .bind(input.gender)
    .bind(input.birth_date)
    .bind(&input.description)
    .bind(&input.photo_url)
    .fetch_one(pool)
    .await?;

    tracing::info!(member_id = %member.id, name = %member.name, "Member created");
    Ok(member)
}

/// Find a member by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Member, AppError> {
    sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("找不到成員".to_string()))
}

/// List members alphabetically.
pub async fn list(
    pool: &PgPool,
    filters: &MemberFilters,
    pagination: &Pagination,
) -> Result<PagedResult<Member>, AppError> {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_index = 0u32;

    if filters.gender.is_some() {
        param_index += 1;
        conditions.push(format!("gender = ${param_index}"));
    }
    if filters.search.is_some() {
        param_index += 1;
        conditions.push(format!("(name ILIKE ${param_index} OR breed ILIKE ${param_index})"));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM members {where_clause}");
    let data_sql = format!(
        "SELECT * FROM members {where_clause} ORDER BY name ASC LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, Member>(&data_sql);

    if let Some(gender) = filters.gender {
        count_query = count_query.bind(gender);
        data_query = data_query.bind(gender);
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

/// Update a member; absent fields keep their current value.
pub async fn update(pool: &PgPool, id: Uuid, input: &UpdateMember) -> Result<Member, AppError> {
    input.validate()?;

    sqlx::query_as::<_, Member>(
        r#"
        UPDATE members SET
            name = COALESCE($2, name),
            breed = COALESCE($3, breed),
            gender = COALESCE($4, gender),
            birth_date = COALESCE($5, birth_date),
            description = COALESCE($6, description),
            photo_url = COALESCE($7, photo_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.breed)
    .bind(input.gender)
    .bind(input.birth_date)
    .bind(&input.description)
    .bind(&input.photo_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("找不到成員".to_string()))
}

/// Delete a member. Puppies referencing it as a parent keep their row with the link cleared.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("找不到成員".to_string()));
    }

    tracing::info!(member_id = %id, "Member deleted");
    Ok(())
}
