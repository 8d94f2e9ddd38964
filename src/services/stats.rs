//! Dashboard statistics: per-collection totals and week-over-week activity.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::db::store::{Collection, DataStore, Filter};
use crate::errors::AppError;

/// Length of one recency window in days.
pub const RECENCY_WINDOW_DAYS: i64 = 7;

const CREATED_AT: &str = "created_at";

/// Row counts for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceCount {
    pub total: i64,
    /// Rows created within the trailing recency window.
    pub recent: i64,
    /// Week-over-week delta, e.g. `"+50.0%"`.
    pub change: String,
}

impl ResourceCount {
    fn tracked(total: i64, recent: i64, previous: i64) -> Self {
        Self {
            total,
            recent,
            change: format_change(recent, previous),
        }
    }

    /// Collections without recency tracking report a flat week.
    fn untracked(total: i64) -> Self {
        Self {
            total,
            recent: 0,
            change: "0%".to_string(),
        }
    }
}

/// Statistics for every collection, keyed by resource name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub posts: ResourceCount,
    pub members: ResourceCount,
    pub puppies: ResourceCount,
    pub environments: ResourceCount,
}

/// Format the change from `previous` to `recent` as a signed percentage.
///
/// An empty previous window reads as `+100%` when anything happened this week
/// and `0%` otherwise.
pub fn format_change(recent: i64, previous: i64) -> String {
    if previous == 0 {
        return if recent > 0 { "+100%" } else { "0%" }.to_string();
    }

    let pct = (recent - previous) as f64 / previous as f64 * 100.0;
    if pct >= 0.0 {
        format!("+{pct:.1}%")
    } else {
        format!("{pct:.1}%")
    }
}

/// Compute a fresh snapshot relative to `now`.
///
/// All count queries run concurrently. The first failure aborts the whole
/// computation; no partial snapshot is ever returned.
pub async fn compute_stats<S: DataStore>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<StatsSnapshot, AppError> {
    let one_week_ago = now - Duration::days(RECENCY_WINDOW_DAYS);
    let two_weeks_ago = one_week_ago - Duration::days(RECENCY_WINDOW_DAYS);

    let recent = [Filter::Gte(CREATED_AT, one_week_ago)];
    let previous = [
        Filter::Gte(CREATED_AT, two_weeks_ago),
        Filter::Lt(CREATED_AT, one_week_ago),
    ];

    // Environments change rarely and are not tracked week over week.
    let (
        posts_total,
        members_total,
        puppies_total,
        environments_total,
        posts_recent,
        puppies_recent,
        members_recent,
        posts_previous,
        puppies_previous,
        members_previous,
    ) = tokio::try_join!(
        store.count(Collection::Posts, &[]),
        store.count(Collection::Members, &[]),
        store.count(Collection::Puppies, &[]),
        store.count(Collection::Environments, &[]),
        store.count(Collection::Posts, &recent),
        store.count(Collection::Puppies, &recent),
        store.count(Collection::Members, &recent),
        store.count(Collection::Posts, &previous),
        store.count(Collection::Puppies, &previous),
        store.count(Collection::Members, &previous),
    )
    .map_err(|e| AppError::StatsFetch(e.to_string()))?;

    tracing::debug!(
        posts_total,
        members_total,
        puppies_total,
        environments_total,
        "Computed dashboard statistics"
    );

    Ok(StatsSnapshot {
        posts: ResourceCount::tracked(posts_total, posts_recent, posts_previous),
        members: ResourceCount::tracked(members_total, members_recent, members_previous),
        puppies: ResourceCount::tracked(puppies_total, puppies_recent, puppies_previous),
        environments: ResourceCount::untracked(environments_total),
    })
}
