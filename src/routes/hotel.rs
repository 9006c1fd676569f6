//! Hotel and room listing routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::hotel::Hotel;
use crate::models::room::Room;
use crate::services::hotels;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HotelQuery {
    pub hotel_id: Option<String>,
}

/// GET /api/v1/hotel
pub async fn hotel(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<HotelQuery>,
) -> Result<Json<ApiResponse<Hotel>>, AppError> {
    let hotel_id = state.require_hotel_id(query.hotel_id.as_deref())?;
    let hotel = hotels::fetch_hotel(&state.graphql, Some(&current_user.token), &hotel_id).await?;
    Ok(ApiResponse::success(hotel))
}

/// GET /api/v1/rooms
pub async fn rooms(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<HotelQuery>,
) -> Result<Json<ApiResponse<Vec<Room>>>, AppError> {
    let hotel_id = state.require_hotel_id(query.hotel_id.as_deref())?;
    let rooms = hotels::fetch_rooms(&state.graphql, Some(&current_user.token), &hotel_id).await?;
    Ok(ApiResponse::success(rooms))
}
