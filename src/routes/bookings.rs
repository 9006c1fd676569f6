//! Booking routes: listing, detail, and front-desk mutations.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::booking::{
    AddRoomCharge, Booking, CollectPayment, ExtendStay, UpdateBookingStatus,
};
use crate::models::date_range::RangeQuery;
use crate::services::bookings as booking_service;
use crate::AppState;

/// GET /api/v1/bookings: bookings checking in during a date range.
pub async fn list(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let range = query.resolve(Utc::now().date_naive())?;
    let hotel_id = state.require_hotel_id(query.hotel_id.as_deref())?;
    let bookings = booking_service::fetch_bookings(
        &state.graphql,
        Some(&current_user.token),
        &hotel_id,
        range,
    )
    .await?;
    Ok(ApiResponse::success(bookings))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking =
        booking_service::fetch_booking(&state.graphql, Some(&current_user.token), &id).await?;
    Ok(ApiResponse::success(booking))
}

/// PATCH /api/v1/bookings/{id}/status: lifecycle status change.
pub async fn update_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateBookingStatus>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = booking_service::update_status(
        &state.graphql,
        Some(&current_user.token),
        &id,
        body.status,
    )
    .await?;
    Ok(ApiResponse::success(booking))
}

/// POST /api/v1/bookings/{id}/extend: move check-out later.
pub async fn extend_stay(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<ExtendStay>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking =
        booking_service::extend_stay(&state.graphql, Some(&current_user.token), &id, &body)
            .await?;
    Ok(ApiResponse::success(booking))
}

/// POST /api/v1/bookings/{id}/payments
pub async fn collect_payment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<CollectPayment>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking =
        booking_service::collect_payment(&state.graphql, Some(&current_user.token), &id, &body)
            .await?;
    Ok(ApiResponse::success(booking))
}

/// POST /api/v1/bookings/{id}/charges
pub async fn add_room_charge(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<AddRoomCharge>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking =
        booking_service::add_room_charge(&state.graphql, Some(&current_user.token), &id, &body)
            .await?;
    Ok(ApiResponse::success(booking))
}
