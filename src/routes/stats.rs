//! Dashboard statistics route.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};

use crate::db::store::{DataStore, PgStore};
use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::services::stats::{self, StatsSnapshot};
use crate::AppState;

/// GET /api/v1/stats: collection totals with week-over-week change.
pub async fn get_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<StatsSnapshot>>, AppError> {
    let store = PgStore::new(state.db.clone(), user.session_scope());
    stats_body(&store, Utc::now()).await
}

async fn stats_body<S: DataStore>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<Json<ApiResponse<StatsSnapshot>>, AppError> {
    let snapshot = stats::compute_stats(store, now).await?;
    Ok(ApiResponse::success(snapshot))
}
