//! Booking records as returned by the hotel GraphQL API.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::wire;

const SECONDS_PER_DAY: i64 = 86_400;

/// Booking lifecycle states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
    /// Any value this service does not know about yet.
    #[default]
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    /// Wire name as used by the GraphQL schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::CheckedIn => "CHECKED_IN",
            Self::CheckedOut => "CHECKED_OUT",
            Self::Cancelled => "CANCELLED",
            Self::NoShow => "NO_SHOW",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Check whether a status change follows the booking lifecycle.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::CheckedIn)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::NoShow)
                | (Self::CheckedIn, Self::CheckedOut)
        )
    }

    /// Cancelled and no-show bookings never occupy a room.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Cancelled | Self::NoShow)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guest sub-record embedded in a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payment line item attached to a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "wire::amount")]
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "wire::datetime")]
    pub paid_at: Option<NaiveDateTime>,
}

impl Payment {
    /// Failed and refunded payments do not count towards the amount paid.
    pub fn is_settled(&self) -> bool {
        !matches!(
            self.status.as_deref().map(str::to_ascii_uppercase).as_deref(),
            Some("FAILED") | Some("REFUNDED")
        )
    }
}

/// Ad-hoc charge posted to a room during a stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCharge {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "wire::amount")]
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "wire::datetime")]
    pub charged_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub guest: Option<Guest>,
    #[serde(default, deserialize_with = "wire::datetime")]
    pub check_in: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "wire::datetime")]
    pub check_out: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "wire::amount")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "wire::amount")]
    pub base_amount: f64,
    #[serde(default, deserialize_with = "wire::amount")]
    pub tax_amount: f64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub payments: Vec<Payment>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub room_charges: Vec<RoomCharge>,
    #[serde(default, deserialize_with = "wire::datetime")]
    pub created_at: Option<NaiveDateTime>,
}

impl Booking {
    /// Source label used when the backend leaves it blank.
    pub const DEFAULT_SOURCE: &'static str = "Direct";

    pub fn check_in_date(&self) -> Option<NaiveDate> {
        self.check_in.map(|dt| dt.date())
    }

    pub fn check_out_date(&self) -> Option<NaiveDate> {
        self.check_out.map(|dt| dt.date())
    }

    /// Room-nights this booking accounts for: `max(1, ceil(nights))`.
    pub fn room_nights(&self) -> i64 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                let secs = (check_out - check_in).num_seconds();
                let nights = (secs + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY);
                nights.max(1)
            }
            _ => 1,
        }
    }

    pub fn source_label(&self) -> &str {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(Self::DEFAULT_SOURCE)
    }

    /// Lower-cased guest email, if one is present.
    pub fn guest_email(&self) -> Option<String> {
        self.guest
            .as_ref()
            .and_then(|g| g.email.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_lowercase)
    }

    pub fn guest_name(&self) -> Option<&str> {
        self.guest
            .as_ref()
            .and_then(|g| g.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    pub fn amount_paid(&self) -> f64 {
        self.payments
            .iter()
            .filter(|p| p.is_settled())
            .map(|p| p.amount)
            .sum()
    }

    /// Remaining balance, never negative.
    pub fn outstanding(&self) -> f64 {
        (self.total_amount - self.amount_paid()).max(0.0)
    }

    /// Whether the stay covers `day` (check-in day inclusive, check-out day exclusive).
    pub fn occupies(&self, day: NaiveDate) -> bool {
        let Some(check_in) = self.check_in_date() else {
            return false;
        };
        match self.check_out_date().filter(|out| *out > check_in) {
            Some(check_out) => check_in <= day && day < check_out,
            None => day == check_in,
        }
    }
}

/// Body of `PATCH /bookings/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

/// Body of `POST /bookings/{id}/extend`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExtendStay {
    pub new_check_out: NaiveDate,
    #[validate(range(min = 0.0))]
    pub additional_amount: Option<f64>,
}

/// Body of `POST /bookings/{id}/payments`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CollectPayment {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1, max = 64))]
    pub method: String,
    pub reference: Option<String>,
}

/// Body of `POST /bookings/{id}/charges`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddRoomCharge {
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn booking(value: serde_json::Value) -> Booking {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_graphql_booking() {
        let b = booking(json!({
            "id": "b-1",
            "roomId": "r-1",
            "guest": { "name": "Ada Lovelace", "email": "ADA@example.com", "phone": null },
            "checkIn": "2024-05-01",
            "checkOut": "2024-05-04T11:00:00Z",
            "status": "CHECKED_IN",
            "totalAmount": "450.50",
            "baseAmount": 400,
            "taxAmount": null,
            "source": "Booking.com",
            "payments": [{ "amount": 100, "status": "COMPLETED" }],
            "roomCharges": null
        }));
        assert_eq!(b.status, BookingStatus::CheckedIn);
        assert_eq!(b.total_amount, 450.5);
        assert_eq!(b.tax_amount, 0.0);
        assert_eq!(b.guest_email().as_deref(), Some("ada@example.com"));
        assert_eq!(b.room_nights(), 4);
        assert!(b.room_charges.is_empty());
        assert_eq!(b.outstanding(), 350.5);
    }

    #[test]
    fn unknown_status_does_not_fail() {
        let b = booking(json!({ "id": "b-2", "status": "ON_HOLD" }));
        assert_eq!(b.status, BookingStatus::Unknown);
        let b = booking(json!({ "id": "b-3", "status": null }));
        assert_eq!(b.status, BookingStatus::Unknown);
    }

    #[test]
    fn room_nights_floor_to_one() {
        let reversed = booking(json!({
            "id": "b-4",
            "checkIn": "2024-05-05",
            "checkOut": "2024-05-03"
        }));
        assert_eq!(reversed.room_nights(), 1);

        let open_ended = booking(json!({ "id": "b-5", "checkIn": "2024-05-05" }));
        assert_eq!(open_ended.room_nights(), 1);

        let partial = booking(json!({
            "id": "b-6",
            "checkIn": "2024-05-05T15:00:00Z",
            "checkOut": "2024-05-07T11:00:00Z"
        }));
        assert_eq!(partial.room_nights(), 2);
    }

    #[test]
    fn missing_source_defaults_to_direct() {
        let b = booking(json!({ "id": "b-7", "source": "  " }));
        assert_eq!(b.source_label(), "Direct");
    }

    #[test]
    fn occupancy_excludes_check_out_day() {
        let b = booking(json!({
            "id": "b-8",
            "checkIn": "2024-05-01",
            "checkOut": "2024-05-03"
        }));
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        assert!(b.occupies(day(1)));
        assert!(b.occupies(day(2)));
        assert!(!b.occupies(day(3)));
    }

    #[test]
    fn failed_payments_are_not_counted() {
        let b = booking(json!({
            "id": "b-9",
            "totalAmount": 200,
            "payments": [
                { "amount": 150, "status": "failed" },
                { "amount": 50 }
            ]
        }));
        assert_eq!(b.amount_paid(), 50.0);
        assert_eq!(b.outstanding(), 150.0);
    }

    #[test]
    fn lifecycle_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(CheckedOut));
        assert!(Confirmed.can_transition_to(NoShow));
        assert!(!CheckedOut.can_transition_to(CheckedIn));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(CheckedOut));
        assert!(!Unknown.can_transition_to(Confirmed));
    }

    #[test]
    fn status_serializes_to_wire_name() {
        let json = serde_json::to_string(&BookingStatus::NoShow).unwrap();
        assert_eq!(json, "\"NO_SHOW\"");
        assert_eq!(BookingStatus::CheckedOut.to_string(), "CHECKED_OUT");
    }

    #[test]
    fn payment_validation() {
        let bad = CollectPayment {
            amount: 0.0,
            method: "CARD".to_string(),
            reference: None,
        };
        assert!(bad.validate().is_err());
        let good = CollectPayment {
            amount: 10.0,
            method: "CARD".to_string(),
            reference: None,
        };
        assert!(good.validate().is_ok());
    }
}
