//! Puppy listing service.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::member::Gender;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::puppy::{CreatePuppy, Puppy, PuppyStatus, UpdatePuppy};

/// Filters for listing puppies.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PuppyFilters {
    pub status: Option<PuppyStatus>,
    pub gender: Option<Gender>,
    pub breed: Option<String>,
}

/// Parent references point at members; a dangling ID is a client error.
fn map_parent_violation(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::Validation("父犬或母犬不存在".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// Create a new puppy listing.
pub async fn create(pool: &PgPool, input: &CreatePuppy) -> Result<Puppy, AppError> {
    input.validate()?;

    let puppy = sqlx::query_as::<_, Puppy>(
        r#"
        INSERT INTO puppies (name, breed, gender, birth_date, price, status,
            description, photo_url, sire_id, dam_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.breed)
    .bind(input.gender)
    .bind(input.birth_date)
    .bind(input.price)
    .bind(input.status)
    .bind(&input.description)
    .bind(&input.photo_url)
    .bind(input.sire_id)
    .bind(input.dam_id)
    .fetch_one(pool)
    .await
    .map_err(map_parent_violation)?;

    tracing::info!(puppy_id = %puppy.id, name = %puppy.name, "Puppy created");
    Ok(puppy)
}

/// Find a puppy by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Puppy, AppError> {
    sqlx::query_as::<_, Puppy>("SELECT * FROM puppies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("找不到幼犬".to_string()))
}

/// List puppies, youngest litter first.
pub async fn list(
    pool: &PgPool,
    filters: &PuppyFilters,
    pagination: &Pagination,
) -> Result<PagedResult<Puppy>, AppError> {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_index = 0u32;

    if filters.status.is_some() {
        param_index += 1;
        conditions.push(format!("status = ${param_index}"));
    }
    if filters.gender.is_some() {
        param_index += 1;
        conditions.push(format!("gender = ${param_index}"));
    }
    if filters.breed.is_some() {
        param_index += 1;
        conditions.push(format!("breed ILIKE ${param_index}"));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM puppies {where_clause}");
    let data_sql = format!(
        "SELECT * FROM puppies {where_clause} \
         ORDER BY birth_date DESC NULLS LAST, created_at DESC LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, Puppy>(&data_sql);

    macro_rules! bind_both {
        ($val:expr) => {
            count_query = count_query.bind($val);
            data_query = data_query.bind($val);
        };
    }

    if let Some(status) = filters.status {
        bind_both!(status);
    }
    if let Some(gender) = filters.gender {
        bind_both!(gender);
    }
    if let Some(ref breed) = filters.breed {
        let pattern = format!("%{breed}%");
        count_query = count_query.bind(pattern.clone());
        data_query = data_query.bind(pattern);
    }

    let total = count_query.fetch_one(pool).await?;
    let items = data_query.fetch_all(pool).await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Update a puppy listing; absent fields keep their current value.
pub async fn update(pool: &PgPool, id: Uuid, input: &UpdatePuppy) -> Result<Puppy, AppError> {
    input.validate()?;

    sqlx::query_as::<_, Puppy>(
        r#"
        UPDATE puppies SET
            name = COALESCE($2, name),
            breed = COALESCE($3, breed),
            gender = COALESCE($4, gender),
            birth_date = COALESCE($5, birth_date),
            price = COALESCE($6, price),
            status = COALESCE($7, status),
            description = COALESCE($8, description),
            photo_url = COALESCE($9, photo_url),
            sire_id = COALESCE($10, sire_id),
            dam_id = COALESCE($11, dam_id),
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
    .bind(input.price)
    .bind(input.status)
    .bind(&input.description)
    .bind(&input.photo_url)
    .bind(input.sire_id)
    .bind(input.dam_id)
    .fetch_optional(pool)
    .await
    .map_err(map_parent_violation)?
    .ok_or_else(|| AppError::NotFound("找不到幼犬".to_string()))
}

/// Delete a puppy listing.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM puppies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("找不到幼犬".to_string()));
    }

    tracing::info!(puppy_id = %id, "Puppy deleted");
    Ok(())
}
