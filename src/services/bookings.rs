//! Booking retrieval and the booking mutations exposed to the front desk.
//!
//! Mutations are thin wrappers over the GraphQL API. Each one runs a local
//! pre-flight check first so obviously invalid requests never leave the
//! service; the backend still has the final word.

use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::AppError;
use crate::graphql::{documents, GraphqlClient};
use crate::models::booking::{AddRoomCharge, Booking, BookingStatus, CollectPayment, ExtendStay};
use crate::models::date_range::DateRange;

#[derive(Debug, Deserialize)]
struct BookingsData {
    #[serde(default)]
    bookings: Option<Vec<Booking>>,
}

#[derive(Debug, Deserialize)]
struct BookingData {
    booking: Option<Booking>,
}

#[derive(Debug, Deserialize)]
struct BookingCountData {
    #[serde(rename = "bookingCount", default)]
    booking_count: Value,
}

/// Fetch bookings whose check-in falls inside `range`.
pub async fn fetch_bookings(
    client: &GraphqlClient,
    token: Option<&str>,
    hotel_id: &str,
    range: DateRange,
) -> Result<Vec<Booking>, AppError> {
    let data: BookingsData = client
        .execute(
            token,
            &documents::bookings(),
            json!({
                "hotelId": hotel_id,
                "from": range.from.to_string(),
                "to": range.to.to_string(),
            }),
        )
        .await?;
    let bookings = data.bookings.unwrap_or_default();
    tracing::debug!(
        hotel_id,
        from = %range.from,
        to = %range.to,
        count = bookings.len(),
        "Fetched bookings"
    );
    Ok(bookings)
}

/// Fetch a single booking by ID.
pub async fn fetch_booking(
    client: &GraphqlClient,
    token: Option<&str>,
    booking_id: &str,
) -> Result<Booking, AppError> {
    let data: BookingData = client
        .execute(token, &documents::booking(), json!({ "id": booking_id }))
        .await?;
    data.booking
        .ok_or_else(|| AppError::NotFound(format!("Booking {booking_id} not found")))
}

/// Total number of bookings held by the hotel, used to detect new ones.
pub async fn count_bookings(
    client: &GraphqlClient,
    token: Option<&str>,
    hotel_id: &str,
) -> Result<u64, AppError> {
    let data: BookingCountData = client
        .execute(token, documents::BOOKING_COUNT, json!({ "hotelId": hotel_id }))
        .await?;
    parse_booking_count(&data.booking_count)
}

/// A count must be a whole, non-negative number. Anything else is an upstream
/// fault so the poller keeps its previous baseline.
fn parse_booking_count(value: &Value) -> Result<u64, AppError> {
    value
        .as_u64()
        .ok_or_else(|| AppError::Upstream(format!("invalid bookingCount {value}")))
}

/// Move a booking to a new status if the lifecycle allows it.
pub async fn update_status(
    client: &GraphqlClient,
    token: Option<&str>,
    booking_id: &str,
    status: BookingStatus,
) -> Result<Booking, AppError> {
    let current = fetch_booking(client, token, booking_id).await?;
    if !current.status.can_transition_to(status) {
        return Err(AppError::InvalidTransition(format!(
            "booking {booking_id} cannot move from {} to {status}",
            current.status
        )));
    }

    let data: UpdatedBooking = client
        .execute(
            token,
            &documents::update_booking_status(),
            json!({ "id": booking_id, "status": status }),
        )
        .await?;
    tracing::info!(
        booking_id,
        from = %current.status,
        to = %status,
        "Booking status updated"
    );
    data.into_booking("updateBookingStatus")
}

/// Push a booking's check-out to a later date.
pub async fn extend_stay(
    client: &GraphqlClient,
    token: Option<&str>,
    booking_id: &str,
    input: &ExtendStay,
) -> Result<Booking, AppError> {
    input.validate()?;
    let current = fetch_booking(client, token, booking_id).await?;
    if current.status.is_void() || current.status == BookingStatus::CheckedOut {
        return Err(AppError::InvalidTransition(format!(
            "booking {booking_id} is {} and cannot be extended",
            current.status
        )));
    }
    if let Some(check_out) = current.check_out_date() {
        if input.new_check_out <= check_out {
            return Err(AppError::Validation(format!(
                "new check-out {} must be after current check-out {check_out}",
                input.new_check_out
            )));
        }
    }

    let data: UpdatedBooking = client
        .execute(
            token,
            &documents::extend_stay(),
            json!({
                "id": booking_id,
                "newCheckOut": input.new_check_out.to_string(),
                "additionalAmount": input.additional_amount,
            }),
        )
        .await?;
    tracing::info!(booking_id, new_check_out = %input.new_check_out, "Stay extended");
    data.into_booking("extendStay")
}

/// Record a payment against a booking.
pub async fn collect_payment(
    client: &GraphqlClient,
    token: Option<&str>,
    booking_id: &str,
    input: &CollectPayment,
) -> Result<Booking, AppError> {
    input.validate()?;
    let data: UpdatedBooking = client
        .execute(
            token,
            &documents::collect_payment(),
            json!({
                "bookingId": booking_id,
                "amount": input.amount,
                "method": input.method,
                "reference": input.reference,
            }),
        )
        .await?;
    tracing::info!(booking_id, amount = input.amount, method = %input.method, "Payment collected");
    data.into_booking("collectPayment")
}

/// Post an ad-hoc charge (minibar, laundry, ...) to a booking.
pub async fn add_room_charge(
    client: &GraphqlClient,
    token: Option<&str>,
    booking_id: &str,
    input: &AddRoomCharge,
) -> Result<Booking, AppError> {
    input.validate()?;
    let description = input.description.trim();
    if description.is_empty() {
        return Err(AppError::Validation(
            "description must not be blank".to_string(),
        ));
    }
    let data: UpdatedBooking = client
        .execute(
            token,
            &documents::add_room_charge(),
            json!({
                "bookingId": booking_id,
                "description": description,
                "amount": input.amount,
                "category": input.category,
            }),
        )
        .await?;
    tracing::info!(booking_id, amount = input.amount, "Room charge added");
    data.into_booking("addRoomCharge")
}

/// Mutation payload keyed by the mutation's field name.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct UpdatedBooking(serde_json::Map<String, Value>);

impl UpdatedBooking {
    fn into_booking(mut self, field: &str) -> Result<Booking, AppError> {
        let value = self
            .0
            .remove(field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| AppError::Upstream(format!("{field} returned no booking")))?;
        serde_json::from_value(value)
            .map_err(|e| AppError::Internal(format!("Could not decode {field} result: {e}")))
    }
}
