//! Dashboard routes: aggregated analytics for the overview page.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::date_range::RangeQuery;
use crate::services::dashboard::{self, DashboardSnapshot, SnapshotKey};
use crate::AppState;

/// GET /api/v1/dashboard: metrics and chart series for a date range.
pub async fn analytics(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<ApiResponse<DashboardSnapshot>>, AppError> {
    let range = query.resolve(Utc::now().date_naive())?;
    let hotel_id = state.require_hotel_id(query.hotel_id.as_deref())?;
    let key = SnapshotKey {
        subject: current_user.subject.clone(),
        hotel_id,
        range,
    };
    let snapshot = dashboard::refresh(
        &state.graphql,
        &state.dashboard_cache,
        Some(&current_user.token),
        key,
    )
    .await?;
    Ok(ApiResponse::success(snapshot))
}
