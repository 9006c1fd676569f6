//! GraphQL documents sent to the hotel API. Values always travel as variables.

const BOOKING_FIELDS: &str = r#"
    id
    roomId
    guest { name email phone }
    checkIn
    checkOut
    status
    totalAmount
    baseAmount
    taxAmount
    source
    createdAt
    payments { id amount method status paidAt }
    roomCharges { id description amount category chargedAt }
"#;

pub const HOTEL: &str = r#"
query Hotel($id: ID!) {
  hotel(id: $id) {
    id
    name
    description
    address
    city
    country
    phone
    email
    starRating
    policies { checkInTime checkOutTime cancellationPolicy petsAllowed smokingAllowed }
    roomCount
    floorCount
  }
}
"#;

pub const ROOMS: &str = r#"
query Rooms($hotelId: ID!) {
  rooms(hotelId: $hotelId) {
    id
    hotelId
    roomNumber
    type
    floor
    maxOccupancy
    baseOccupancy
    status
    isActive
  }
}
"#;

pub const BOOKING_COUNT: &str = r#"
query BookingCount($hotelId: ID!) {
  bookingCount(hotelId: $hotelId)
}
"#;

pub const HEALTH: &str = "query Health { __typename }";

/// Bookings whose check-in falls in `[from, to]`.
pub fn bookings() -> String {
    format!(
        r#"
query Bookings($hotelId: ID!, $from: String!, $to: String!) {{
  bookings(hotelId: $hotelId, checkInFrom: $from, checkInTo: $to) {{ {BOOKING_FIELDS} }}
}}
"#
    )
}

pub fn booking() -> String {
    format!(
        r#"
query Booking($id: ID!) {{
  booking(id: $id) {{ {BOOKING_FIELDS} }}
}}
"#
    )
}

pub fn update_booking_status() -> String {
    format!(
        r#"
mutation UpdateBookingStatus($id: ID!, $status: BookingStatus!) {{
  updateBookingStatus(id: $id, status: $status) {{ {BOOKING_FIELDS} }}
}}
"#
    )
}

pub fn extend_stay() -> String {
    format!(
        r#"
mutation ExtendStay($id: ID!, $newCheckOut: String!, $additionalAmount: Float) {{
  extendStay(id: $id, newCheckOut: $newCheckOut, additionalAmount: $additionalAmount) {{ {BOOKING_FIELDS} }}
}}
"#
    )
}

pub fn collect_payment() -> String {
    format!(
        r#"
mutation CollectPayment($bookingId: ID!, $amount: Float!, $method: String!, $reference: String) {{
  collectPayment(bookingId: $bookingId, amount: $amount, method: $method, reference: $reference) {{ {BOOKING_FIELDS} }}
}}
"#
    )
}

pub fn add_room_charge() -> String {
    format!(
        r#"
mutation AddRoomCharge($bookingId: ID!, $description: String!, $amount: Float!, $category: String) {{
  addRoomCharge(bookingId: $bookingId, description: $description, amount: $amount, category: $category) {{ {BOOKING_FIELDS} }}
}}
"#
    )
}

/// Operation name of a document, for logging.
pub fn operation_name(document: &str) -> &str {
    document
        .split_whitespace()
        .skip_while(|word| !matches!(*word, "query" | "mutation"))
        .nth(1)
        .map(|name| name.split(['(', '{']).next().unwrap_or(name))
        .filter(|name| !name.is_empty())
        .unwrap_or("anonymous")
}
