//! Count-oriented data store abstraction.
//!
//! Aggregations only ever need "how many rows in collection X match these
//! predicates". [`DataStore`] captures exactly that, so the statistics service
//! can run against Postgres in production and an in-memory fake in tests.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;

/// Named record collections backing the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Posts,
    Members,
    Puppies,
    Environments,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Posts,
        Collection::Members,
        Collection::Puppies,
        Collection::Environments,
    ];

    /// Table name in the database. Also the resource key in API payloads.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Members => "members",
            Self::Puppies => "puppies",
            Self::Environments => "environments",
        }
    }
}

/// Right-hand side of an equality filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Uuid(Uuid),
}

/// A single predicate over a column. Predicates in a slice are AND-ed.
///
/// Column names are `'static` so only compile-time identifiers reach the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(&'static str, FilterValue),
    Gte(&'static str, DateTime<Utc>),
    Lt(&'static str, DateTime<Utc>),
}

/// Read access needed by aggregations: count rows matching a set of filters.
pub trait DataStore: Send + Sync {
    fn count(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
}

/// Caller session forwarded into every query so row-level security policies
/// can decide row visibility.
#[derive(Clone)]
pub struct SessionScope {
    pub user_id: Uuid,
    pub role: String,
    /// Verified bearer token of the caller.
    pub token: String,
}

impl std::fmt::Debug for SessionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionScope")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("token", &"[redacted]")
            .finish()
    }
}

/// Session settings applied at the start of each store transaction.
const SCOPE_SQL: &str = "SELECT set_config('app.current_user_id', $1, true), \
                                set_config('app.current_user_role', $2, true), \
                                set_config('app.session_token', $3, true)";

/// Postgres-backed [`DataStore`] bound to one caller's session.
///
/// Constructed per request; never shared between callers.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    session: SessionScope,
}

impl PgStore {
    pub fn new(pool: PgPool, session: SessionScope) -> Self {
        Self { pool, session }
    }
}

impl DataStore for PgStore {
    async fn count(&self, collection: Collection, filters: &[Filter]) -> Result<i64, AppError> {
        // Transaction-local settings vanish on commit, so the scope cannot leak
        // to the next borrower of this pooled connection.
        let mut tx = self.pool.begin().await?;

        sqlx::query(SCOPE_SQL)
            .bind(self.session.user_id.to_string())
            .bind(&self.session.role)
            .bind(&self.session.token)
            .execute(&mut *tx)
            .await?;

        let mut query = count_query(collection, filters);
        let count: i64 = query.build_query_scalar::<i64>().fetch_one(&mut *tx).await?;

        tx.commit().await?;
        Ok(count)
    }
}

/// Build `SELECT COUNT(*) FROM <table> [WHERE ...]` with bound parameters.
fn count_query(collection: Collection, filters: &[Filter]) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM ");
    qb.push(collection.table());

    for (i, filter) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match filter {
            Filter::Eq(column, value) => {
                qb.push(*column);
                match value {
                    // Cast so text also compares against enum-typed columns.
                    FilterValue::Text(s) => qb.push("::text = ").push_bind(s.clone()),
                    FilterValue::Bool(b) => qb.push(" = ").push_bind(*b),
                    FilterValue::Uuid(id) => qb.push(" = ").push_bind(*id),
                };
            }
            Filter::Gte(column, ts) => {
                qb.push(*column).push(" >= ").push_bind(*ts);
            }
            Filter::Lt(column, ts) => {
                qb.push(*column).push(" < ").push_bind(*ts);
            }
        }
    }

    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_query_without_filters() {
        let qb = count_query(Collection::Environments, &[]);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM environments");
    }

    #[test]
    fn count_query_with_date_window() {
        let now = Utc::now();
        let qb = count_query(
            Collection::Posts,
            &[
                Filter::Gte("created_at", now - chrono::Duration::days(14)),
                Filter::Lt("created_at", now - chrono::Duration::days(7)),
            ],
        );
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM posts WHERE created_at >= $1 AND created_at < $2"
        );
    }

    #[test]
    fn count_query_with_equality() {
        let qb = count_query(
            Collection::Puppies,
            &[Filter::Eq("status", FilterValue::Text("Available".to_string()))],
        );
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM puppies WHERE status::text = $1");
    }

    #[test]
    fn scope_sets_caller_role_and_token() {
        for setting in ["app.current_user_id", "app.current_user_role", "app.session_token"] {
            assert!(SCOPE_SQL.contains(setting), "{setting}");
        }
        assert!(SCOPE_SQL.contains("$3, true"));
    }

    #[test]
    fn session_debug_hides_token() {
        let scope = SessionScope {
            user_id: Uuid::nil(),
            role: "Viewer".to_string(),
            token: "header.payload.signature".to_string(),
        };
        let printed = format!("{scope:?}");
        assert!(printed.contains("Viewer"));
        assert!(!printed.contains("signature"));
    }

    #[test]
    fn collection_serializes_as_table_name() {
        for collection in Collection::ALL {
            let json = serde_json::to_value(collection).unwrap();
            assert_eq!(json, collection.table());
        }
    }
}
