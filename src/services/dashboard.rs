//! Dashboard loading and the last-good snapshot cache.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::graphql::GraphqlClient;
use crate::models::date_range::DateRange;
use crate::services::analytics::{self, DashboardMetrics};
use crate::services::{bookings, hotels};

/// Maximum number of snapshots kept before the oldest is evicted.
const MAX_SNAPSHOTS: usize = 256;

/// Dashboard metrics together with where and when they came from.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub hotel_id: String,
    pub fetched_at: DateTime<Utc>,
    /// True when this is an earlier result served because the refresh failed.
    pub stale: bool,
    pub refresh_error: Option<String>,
    pub metrics: DashboardMetrics,
}

/// Snapshots are per viewer so a failed refresh never serves another
/// user's data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub subject: String,
    pub hotel_id: String,
    pub range: DateRange,
}

/// Last successful dashboard result per viewer, hotel and range.
#[derive(Debug, Default)]
pub struct DashboardCache {
    snapshots: RwLock<HashMap<SnapshotKey, DashboardSnapshot>>,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &SnapshotKey) -> Option<DashboardSnapshot> {
        self.snapshots.read().await.get(key).cloned()
    }

    /// Replace the snapshot for `key` wholesale.
    pub async fn store(&self, key: SnapshotKey, snapshot: DashboardSnapshot) {
        let mut snapshots = self.snapshots.write().await;
        if snapshots.len() >= MAX_SNAPSHOTS && !snapshots.contains_key(&key) {
            let oldest = snapshots
                .iter()
                .min_by_key(|(_, s)| s.fetched_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                snapshots.remove(&oldest);
            }
        }
        snapshots.insert(key, snapshot);
    }

    /// Drop every snapshot so the next request refetches.
    pub async fn invalidate_all(&self) -> usize {
        let mut snapshots = self.snapshots.write().await;
        let dropped = snapshots.len();
        snapshots.clear();
        dropped
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Fetch hotel, rooms and bookings concurrently and aggregate them.
///
/// Bookings are requested for the range plus its comparison period.
pub async fn load(
    client: &GraphqlClient,
    token: Option<&str>,
    hotel_id: &str,
    range: DateRange,
) -> Result<DashboardMetrics, AppError> {
    let (hotel, rooms, bookings) = tokio::try_join!(
        hotels::fetch_hotel(client, token, hotel_id),
        hotels::fetch_rooms(client, token, hotel_id),
        bookings::fetch_bookings(client, token, hotel_id, range.with_previous()),
    )?;

    Ok(analytics::compute(&bookings, &rooms, Some(&hotel), range))
}

/// Load fresh metrics, falling back to the last good snapshot on fetch or
/// decode failures.
pub async fn refresh(
    client: &GraphqlClient,
    cache: &DashboardCache,
    token: Option<&str>,
    key: SnapshotKey,
) -> Result<DashboardSnapshot, AppError> {
    match load(client, token, &key.hotel_id, key.range).await {
        Ok(metrics) => {
            let snapshot = DashboardSnapshot {
                hotel_id: key.hotel_id.clone(),
                fetched_at: Utc::now(),
                stale: false,
                refresh_error: None,
                metrics,
            };
            cache.store(key, snapshot.clone()).await;
            Ok(snapshot)
        }
        Err(e) if keeps_previous_state(&e) => {
            tracing::error!(
                error = %e,
                hotel_id = %key.hotel_id,
                from = %key.range.from,
                to = %key.range.to,
                "Dashboard refresh failed"
            );
            match cache.get(&key).await {
                Some(previous) => Ok(DashboardSnapshot {
                    stale: true,
                    refresh_error: Some("The hotel service request failed".to_string()),
                    ..previous
                }),
                None => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

/// Transport, upstream and decode failures keep the previous dashboard.
fn keeps_previous_state(err: &AppError) -> bool {
    err.is_upstream() || matches!(err, AppError::Internal(_))
}
