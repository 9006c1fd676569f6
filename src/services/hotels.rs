//! Hotel and room retrieval.

use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::graphql::{documents, GraphqlClient};
use crate::models::hotel::Hotel;
use crate::models::room::Room;

#[derive(Debug, Deserialize)]
struct HotelData {
    hotel: Option<Hotel>,
}

#[derive(Debug, Deserialize)]
struct RoomsData {
    #[serde(default)]
    rooms: Option<Vec<Room>>,
}

/// Fetch a hotel by ID.
pub async fn fetch_hotel(
    client: &GraphqlClient,
    token: Option<&str>,
    hotel_id: &str,
) -> Result<Hotel, AppError> {
    let data: HotelData = client
        .execute(token, documents::HOTEL, json!({ "id": hotel_id }))
        .await?;
    data.hotel
        .ok_or_else(|| AppError::NotFound(format!("Hotel {hotel_id} not found")))
}

/// Fetch every room of a hotel, active or not.
pub async fn fetch_rooms(
    client: &GraphqlClient,
    token: Option<&str>,
    hotel_id: &str,
) -> Result<Vec<Room>, AppError> {
    let data: RoomsData = client
        .execute(token, documents::ROOMS, json!({ "hotelId": hotel_id }))
        .await?;
    let rooms = data.rooms.unwrap_or_default();
    tracing::debug!(hotel_id, count = rooms.len(), "Fetched rooms");
    Ok(rooms)
}
