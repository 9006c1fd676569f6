//! New-booking notifications fed by the background poller.

use axum::{extract::State, Json};

use crate::errors::ApiResponse;
use crate::middleware::auth::CurrentUser;
use crate::services::booking_watch::BookingWatchState;
use crate::AppState;

/// GET /api/v1/notifications/bookings: pending new-booking count.
pub async fn booking_status(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Json<ApiResponse<BookingWatchState>> {
    ApiResponse::success(state.booking_watch.current())
}

/// POST /api/v1/notifications/bookings/ack: clear pending notifications.
pub async fn acknowledge(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Json<ApiResponse<BookingWatchState>> {
    let after = state.booking_watch.acknowledge();
    tracing::debug!(subject = %current_user.subject, "New-booking notifications acknowledged");
    ApiResponse::success(after)
}
