//! Dashboard analytics: reduces raw bookings and rooms into overview metrics
//! and chart-ready series.
//!
//! Everything here is a pure, synchronous function of its inputs. Callers fetch
//! bookings for [`DateRange::with_previous`] so the comparison baseline and
//! stays that started before `from` are both available.
//!
//! Metric definitions:
//! - Occupancy rate: distinct rooms referenced by in-range bookings over active
//!   rooms, integer percent, capped at 100, 0 with no active rooms.
//! - ADR: revenue over room-nights, 0 with no room-nights.
//! - RevPAR: revenue over (active rooms x days in range), 0 when that is zero.
//! - Percentage changes compare against the previous period of equal length
//!   and are 0 when the baseline is 0.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::booking::{Booking, BookingStatus};
use crate::models::date_range::DateRange;
use crate::models::hotel::Hotel;
use crate::models::room::Room;

/// Number of entries kept in the top-guest list.
pub const TOP_GUEST_LIMIT: usize = 10;

/// Complete analytics payload for one hotel and date range.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub range: DateRange,
    pub previous_range: DateRange,
    pub overview: OverviewMetrics,
    pub room_type_distribution: Vec<CategoryCount>,
    pub booking_source_distribution: Vec<CategoryCount>,
    pub booking_status_distribution: Vec<CategoryCount>,
    pub room_status_distribution: Vec<CategoryCount>,
    pub revenue_by_room_type: Vec<CategoryAmount>,
    pub booking_trend: Vec<DailyBookings>,
    pub revenue_trend: Vec<DailyRevenue>,
    pub occupancy_timeline: Vec<DailyOccupancy>,
    pub floor_summary: Vec<FloorSummary>,
    pub top_guests: Vec<TopGuest>,
    pub payments: PaymentSummary,
}

/// Headline figures with changes relative to the previous period.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewMetrics {
    pub hotel_name: Option<String>,
    pub total_bookings: u64,
    pub bookings_change: f64,
    pub total_revenue: f64,
    pub revenue_change: f64,
    pub occupancy_rate: u32,
    pub occupancy_change: f64,
    pub average_daily_rate: f64,
    pub adr_change: f64,
    pub revpar: f64,
    pub total_room_nights: i64,
    pub average_length_of_stay: f64,
    pub cancellation_rate: u32,
    pub active_rooms: u64,
    pub total_rooms: u64,
    pub total_floors: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBookings {
    pub date: NaiveDate,
    pub bookings: u64,
    pub cancellations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub room_nights: i64,
}

/// Occupancy for one day. `occupancy_rate` is `None` when there are no
/// active rooms to measure against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOccupancy {
    pub date: NaiveDate,
    pub occupied_rooms: u64,
    pub occupancy_rate: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSummary {
    pub floor: i32,
    pub total_rooms: u64,
    pub active_rooms: u64,
    pub occupied_rooms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopGuest {
    pub email: String,
    pub name: Option<String>,
    pub total_spent: f64,
    pub bookings: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub collected: f64,
    pub outstanding: f64,
    pub room_charges: f64,
}

/// Totals for one period, shared by the current and baseline computations.
#[derive(Debug, Default)]
struct PeriodTotals {
    bookings: u64,
    revenue: f64,
    room_nights: i64,
    occupied_rooms: u64,
    void_bookings: u64,
}

impl PeriodTotals {
    fn from_bookings(bookings: &[&Booking]) -> Self {
        let occupied: HashSet<&str> = bookings
            .iter()
            .filter_map(|b| b.room_id.as_deref())
            .collect();
        Self {
            bookings: bookings.len() as u64,
            revenue: bookings.iter().map(|b| b.total_amount).sum(),
            room_nights: bookings.iter().map(|b| b.room_nights()).sum(),
            occupied_rooms: occupied.len() as u64,
            void_bookings: bookings.iter().filter(|b| b.status.is_void()).count() as u64,
        }
    }

    fn occupancy_rate(&self, active_rooms: u64) -> u32 {
        occupancy_percent(self.occupied_rooms, active_rooms).unwrap_or(0)
    }

    fn average_daily_rate(&self) -> f64 {
        if self.room_nights == 0 {
            return 0.0;
        }
        self.revenue / self.room_nights as f64
    }
}

/// Reduce bookings, rooms and hotel into dashboard metrics for `range`.
///
/// `bookings` may include records outside `range`; they are filtered by
/// check-in date here.
pub fn compute(
    bookings: &[Booking],
    rooms: &[Room],
    hotel: Option<&Hotel>,
    range: DateRange,
) -> DashboardMetrics {
    let previous_range = range.previous();
    let current = in_range(bookings, range);
    let previous = in_range(bookings, previous_range);

    let active_rooms = rooms.iter().filter(|r| r.is_active).count() as u64;
    let rooms_by_id: HashMap<&str, &Room> = rooms.iter().map(|r| (r.id.as_str(), r)).collect();

    let now = PeriodTotals::from_bookings(&current);
    let before = PeriodTotals::from_bookings(&previous);

    let overview = overview(&now, &before, rooms, hotel, active_rooms, range);

    DashboardMetrics {
        range,
        previous_range,
        overview,
        room_type_distribution: distribution(
            current
                .iter()
                .map(|b| room_type_of(b, &rooms_by_id).to_string()),
        ),
        booking_source_distribution: distribution(
            current.iter().map(|b| b.source_label().to_string()),
        ),
        booking_status_distribution: distribution(
            current.iter().map(|b| b.status.as_str().to_string()),
        ),
        room_status_distribution: distribution(rooms.iter().map(|r| r.status.label().to_string())),
        revenue_by_room_type: revenue_by_room_type(&current, &rooms_by_id),
        booking_trend: booking_trend(&current, range),
        revenue_trend: revenue_trend(&current, range),
        occupancy_timeline: occupancy_timeline(bookings, range, active_rooms),
        floor_summary: floor_summary(rooms, &current),
        top_guests: top_guests(&current),
        payments: payment_summary(&current),
    }
}

fn in_range(bookings: &[Booking], range: DateRange) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| b.check_in_date().is_some_and(|d| range.contains(d)))
        .collect()
}

fn overview(
    now: &PeriodTotals,
    before: &PeriodTotals,
    rooms: &[Room],
    hotel: Option<&Hotel>,
    active_rooms: u64,
    range: DateRange,
) -> OverviewMetrics {
    let available_room_days = active_rooms as f64 * range.days() as f64;
    let revpar = if available_room_days == 0.0 {
        0.0
    } else {
        now.revenue / available_room_days
    };

    let distinct_floors = rooms.iter().map(|r| r.floor).collect::<HashSet<_>>().len() as u64;

    OverviewMetrics {
        hotel_name: hotel.and_then(|h| h.name.clone()),
        total_bookings: now.bookings,
        bookings_change: percent_change(now.bookings as f64, before.bookings as f64),
        total_revenue: round2(now.revenue),
        revenue_change: percent_change(now.revenue, before.revenue),
        occupancy_rate: now.occupancy_rate(active_rooms),
        occupancy_change: percent_change(
            now.occupancy_rate(active_rooms) as f64,
            before.occupancy_rate(active_rooms) as f64,
        ),
        average_daily_rate: round2(now.average_daily_rate()),
        adr_change: percent_change(now.average_daily_rate(), before.average_daily_rate()),
        revpar: round2(revpar),
        total_room_nights: now.room_nights,
        average_length_of_stay: if now.bookings == 0 {
            0.0
        } else {
            round1(now.room_nights as f64 / now.bookings as f64)
        },
        cancellation_rate: if now.bookings == 0 {
            0
        } else {
            (now.void_bookings as f64 / now.bookings as f64 * 100.0).round() as u32
        },
        active_rooms,
        total_rooms: if rooms.is_empty() {
            hotel.and_then(|h| h.room_count).unwrap_or(0) as u64
        } else {
            rooms.len() as u64
        },
        total_floors: hotel
            .and_then(|h| h.floor_count)
            .map(u64::from)
            .unwrap_or(distinct_floors),
    }
}

fn room_type_of<'a>(booking: &Booking, rooms_by_id: &HashMap<&str, &'a Room>) -> &'a str {
    booking
        .room_id
        .as_deref()
        .and_then(|id| rooms_by_id.get(id).copied())
        .map(Room::type_label)
        .unwrap_or(Room::UNKNOWN_TYPE)
}

/// Group-by-key counts, largest first, ties by name.
fn distribution(keys: impl Iterator<Item = String>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, value)| CategoryCount { name, value })
        .collect();
    out.sort_by(|a, b| b.value.cmp(&a.value));
    out
}

fn revenue_by_room_type(
    bookings: &[&Booking],
    rooms_by_id: &HashMap<&str, &Room>,
) -> Vec<CategoryAmount> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for booking in bookings {
        *sums.entry(room_type_of(booking, rooms_by_id)).or_default() += booking.total_amount;
    }
    let mut out: Vec<CategoryAmount> = sums
        .into_iter()
        .map(|(name, amount)| CategoryAmount {
            name: name.to_string(),
            amount: round2(amount),
        })
        .collect();
    out.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    out
}

fn booking_trend(bookings: &[&Booking], range: DateRange) -> Vec<DailyBookings> {
    let mut days: BTreeMap<NaiveDate, DailyBookings> = range
        .dates()
        .map(|date| {
            (
                date,
                DailyBookings {
                    date,
                    bookings: 0,
                    cancellations: 0,
                },
            )
        })
        .collect();
    for booking in bookings {
        if let Some(day) = booking.check_in_date().and_then(|d| days.get_mut(&d)) {
            day.bookings += 1;
            if booking.status == BookingStatus::Cancelled {
                day.cancellations += 1;
            }
        }
    }
    days.into_values().collect()
}

fn revenue_trend(bookings: &[&Booking], range: DateRange) -> Vec<DailyRevenue> {
    let mut days: BTreeMap<NaiveDate, (f64, i64)> =
        range.dates().map(|date| (date, (0.0, 0))).collect();
    for booking in bookings {
        if let Some(day) = booking.check_in_date().and_then(|d| days.get_mut(&d)) {
            day.0 += booking.total_amount;
            day.1 += booking.room_nights();
        }
    }
    days.into_iter()
        .map(|(date, (revenue, room_nights))| DailyRevenue {
            date,
            revenue: round2(revenue),
            room_nights,
        })
        .collect()
}

/// Per-day occupied rooms from every stay overlapping `range`, not only
/// stays that checked in during it.
fn occupancy_timeline(
    bookings: &[Booking],
    range: DateRange,
    active_rooms: u64,
) -> Vec<DailyOccupancy> {
    let mut occupied: BTreeMap<NaiveDate, HashSet<&str>> =
        range.dates().map(|date| (date, HashSet::new())).collect();

    for booking in bookings.iter().filter(|b| !b.status.is_void()) {
        let (Some(room_id), Some(check_in)) = (booking.room_id.as_deref(), booking.check_in_date())
        else {
            continue;
        };
        let start = check_in.max(range.from);
        for day in start.iter_days().take_while(|d| *d <= range.to) {
            if !booking.occupies(day) {
                break;
            }
            if let Some(rooms) = occupied.get_mut(&day) {
                rooms.insert(room_id);
            }
        }
    }

    occupied
        .into_iter()
        .map(|(date, rooms)| {
            let occupied_rooms = rooms.len() as u64;
            DailyOccupancy {
                date,
                occupied_rooms,
                occupancy_rate: occupancy_percent(occupied_rooms, active_rooms),
            }
        })
        .collect()
}

fn floor_summary(rooms: &[Room], bookings: &[&Booking]) -> Vec<FloorSummary> {
    let occupied: HashSet<&str> = bookings
        .iter()
        .filter_map(|b| b.room_id.as_deref())
        .collect();

    let mut floors: BTreeMap<i32, FloorSummary> = BTreeMap::new();
    for room in rooms {
        let entry = floors.entry(room.floor).or_insert(FloorSummary {
            floor: room.floor,
            total_rooms: 0,
            active_rooms: 0,
            occupied_rooms: 0,
        });
        entry.total_rooms += 1;
        if room.is_active {
            entry.active_rooms += 1;
        }
        if occupied.contains(room.id.as_str()) {
            entry.occupied_rooms += 1;
        }
    }
    floors.into_values().collect()
}

/// Guests ranked by total spend in the range, at most [`TOP_GUEST_LIMIT`].
fn top_guests(bookings: &[&Booking]) -> Vec<TopGuest> {
    let mut guests: HashMap<String, TopGuest> = HashMap::new();
    for booking in bookings {
        let Some(email) = booking.guest_email() else {
            continue;
        };
        let guest = guests.entry(email.clone()).or_insert_with(|| TopGuest {
            email,
            name: None,
            total_spent: 0.0,
            bookings: 0,
        });
        if guest.name.is_none() {
            guest.name = booking.guest_name().map(str::to_string);
        }
        guest.total_spent += booking.total_amount;
        guest.bookings += 1;
    }

    let mut ranked: Vec<TopGuest> = guests.into_values().collect();
    ranked.sort_by(|a, b| {
        b.total_spent
            .total_cmp(&a.total_spent)
            .then_with(|| a.email.cmp(&b.email))
    });
    ranked.truncate(TOP_GUEST_LIMIT);
    for guest in &mut ranked {
        guest.total_spent = round2(guest.total_spent);
    }
    ranked
}

fn payment_summary(bookings: &[&Booking]) -> PaymentSummary {
    PaymentSummary {
        collected: round2(bookings.iter().map(|b| b.amount_paid()).sum()),
        outstanding: round2(bookings.iter().map(|b| b.outstanding()).sum()),
        room_charges: round2(
            bookings
                .iter()
                .flat_map(|b| b.room_charges.iter())
                .map(|c| c.amount)
                .sum(),
        ),
    }
}

fn occupancy_percent(occupied: u64, active: u64) -> Option<u32> {
    if active == 0 {
        return None;
    }
    let pct = (occupied as f64 / active as f64 * 100.0).round() as u32;
    Some(pct.min(100))
}

/// `(current - previous) / previous` in percent, one decimal; 0 without a baseline.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round1((current - previous) / previous * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn range(from: u32, to: u32) -> DateRange {
        DateRange::new(day(from), day(to)).unwrap()
    }

    fn booking(id: &str, room: &str, check_in: u32, check_out: u32, total: f64) -> Booking {
        serde_json::from_value(json!({
            "id": id,
            "roomId": room,
            "checkIn": day(check_in).to_string(),
            "checkOut": day(check_out).to_string(),
            "status": "CONFIRMED",
            "totalAmount": total,
        }))
        .unwrap()
    }

    fn guest_booking(id: &str, email: &str, check_in: u32, total: f64) -> Booking {
        serde_json::from_value(json!({
            "id": id,
            "roomId": "r-1",
            "guest": { "name": format!("Guest {id}"), "email": email },
            "checkIn": day(check_in).to_string(),
            "checkOut": day(check_in + 1).to_string(),
            "status": "CHECKED_OUT",
            "totalAmount": total,
        }))
        .unwrap()
    }

    fn room(id: &str, room_type: &str, floor: Option<i32>, active: bool) -> Room {
        serde_json::from_value(json!({
            "id": id,
            "type": room_type,
            "floor": floor,
            "status": "AVAILABLE",
            "isActive": active,
        }))
        .unwrap()
    }

    #[test]
    fn single_booking_single_room_single_day() {
        let bookings: Vec<Booking> = vec![serde_json::from_value(json!({
            "id": "b-1",
            "roomId": "r-1",
            "checkIn": day(1).to_string(),
            "totalAmount": 100,
        }))
        .unwrap()];
        let rooms = vec![room("r-1", "Standard", Some(1), true)];

        let metrics = compute(&bookings, &rooms, None, range(1, 1));
        assert_eq!(metrics.overview.occupancy_rate, 100);
        assert_eq!(metrics.overview.average_daily_rate, 100.0);
        assert_eq!(metrics.overview.revpar, 100.0);
        assert_eq!(metrics.overview.total_bookings, 1);
        assert_eq!(metrics.overview.total_room_nights, 1);
    }

    #[test]
    fn zero_amount_bookings_do_not_change_revenue() {
        let rooms = vec![room("r-1", "Standard", None, true), room("r-2", "Suite", None, true)];
        let base = vec![booking("b-1", "r-1", 2, 4, 250.0)];
        let mut with_zero = base.clone();
        with_zero.push(booking("b-2", "r-2", 3, 5, 0.0));

        let a = compute(&base, &rooms, None, range(1, 7));
        let b = compute(&with_zero, &rooms, None, range(1, 7));
        assert_eq!(a.overview.total_revenue, b.overview.total_revenue);
        assert_eq!(a.payments.outstanding, b.payments.outstanding);
        let rev_a: f64 = a.revenue_trend.iter().map(|d| d.revenue).sum();
        let rev_b: f64 = b.revenue_trend.iter().map(|d| d.revenue).sum();
        assert_eq!(rev_a, rev_b);
    }

    #[test]
    fn empty_range_yields_zeroes() {
        let rooms = vec![room("r-1", "Standard", None, true)];
        let bookings = vec![booking("b-1", "r-1", 20, 22, 300.0)];

        let metrics = compute(&bookings, &rooms, None, range(1, 5));
        let o = &metrics.overview;
        assert_eq!(o.total_bookings, 0);
        assert_eq!(o.total_revenue, 0.0);
        assert_eq!(o.occupancy_rate, 0);
        assert_eq!(o.average_daily_rate, 0.0);
        assert_eq!(o.revpar, 0.0);
        assert_eq!(o.bookings_change, 0.0);
        assert_eq!(o.revenue_change, 0.0);
        assert_eq!(o.occupancy_change, 0.0);
        assert_eq!(o.adr_change, 0.0);
        assert_eq!(o.cancellation_rate, 0);
        assert!(metrics.top_guests.is_empty());
        assert!(metrics.booking_source_distribution.is_empty());
        assert_eq!(metrics.booking_trend.len(), 5);
        assert!(metrics.booking_trend.iter().all(|d| d.bookings == 0));
    }

    #[test]
    fn occupancy_rate_is_capped() {
        // Bookings reference more rooms than are active.
        let rooms = vec![room("r-1", "Standard", None, true), room("r-2", "Standard", None, false)];
        let bookings = vec![
            booking("b-1", "r-1", 1, 2, 100.0),
            booking("b-2", "r-2", 1, 2, 100.0),
            booking("b-3", "r-9", 1, 2, 100.0),
        ];
        let metrics = compute(&bookings, &rooms, None, range(1, 3));
        assert_eq!(metrics.overview.occupancy_rate, 100);
        assert!(metrics
            .occupancy_timeline
            .iter()
            .all(|d| d.occupancy_rate.unwrap() <= 100));
    }

    #[test]
    fn no_active_rooms_means_no_occupancy_data() {
        let rooms = vec![room("r-1", "Standard", None, false)];
        let bookings = vec![booking("b-1", "r-1", 1, 3, 200.0)];
        let metrics = compute(&bookings, &rooms, None, range(1, 3));
        assert_eq!(metrics.overview.occupancy_rate, 0);
        assert_eq!(metrics.overview.revpar, 0.0);
        assert!(metrics.occupancy_timeline.iter().all(|d| d.occupancy_rate.is_none()));
        assert_eq!(metrics.occupancy_timeline[0].occupied_rooms, 1);
    }

    #[test]
    fn previous_period_changes() {
        let rooms = vec![room("r-1", "Standard", None, true), room("r-2", "Deluxe", None, true)];
        // Current range 8..14, previous 1..7.
        let bookings = vec![
            booking("prev-1", "r-1", 2, 3, 100.0),
            booking("cur-1", "r-1", 9, 10, 150.0),
            booking("cur-2", "r-2", 10, 11, 50.0),
        ];
        let metrics = compute(&bookings, &rooms, None, range(8, 14));
        let o = &metrics.overview;
        assert_eq!(o.total_bookings, 2);
        assert_eq!(o.bookings_change, 100.0);
        assert_eq!(o.total_revenue, 200.0);
        assert_eq!(o.revenue_change, 100.0);
        assert_eq!(o.occupancy_rate, 100);
        assert_eq!(o.occupancy_change, 100.0);
        assert_eq!(o.average_daily_rate, 100.0);
        assert_eq!(o.adr_change, 0.0);
        assert_eq!(o.revpar, round2(200.0 / 14.0));
        assert_eq!(metrics.previous_range, range(1, 7));
    }

    #[test]
    fn distributions_apply_defaults() {
        let rooms = vec![room("r-1", "Suite", Some(3), true)];
        let mut b1 = booking("b-1", "r-1", 1, 2, 100.0);
        b1.source = Some("Expedia".to_string());
        let b2 = booking("b-2", "r-1", 1, 2, 100.0);
        let mut b3 = booking("b-3", "r-404", 2, 3, 40.0);
        b3.status = BookingStatus::Cancelled;

        let metrics = compute(&[b1, b2, b3], &rooms, None, range(1, 3));
        assert_eq!(
            metrics.booking_source_distribution,
            vec![
                CategoryCount { name: "Direct".to_string(), value: 2 },
                CategoryCount { name: "Expedia".to_string(), value: 1 },
            ]
        );
        assert_eq!(
            metrics.room_type_distribution,
            vec![
                CategoryCount { name: "Suite".to_string(), value: 2 },
                CategoryCount { name: "Unknown".to_string(), value: 1 },
            ]
        );
        assert_eq!(
            metrics.booking_status_distribution,
            vec![
                CategoryCount { name: "CONFIRMED".to_string(), value: 2 },
                CategoryCount { name: "CANCELLED".to_string(), value: 1 },
            ]
        );
        assert_eq!(
            metrics.room_status_distribution,
            vec![CategoryCount { name: "Available".to_string(), value: 1 }]
        );
        assert_eq!(metrics.revenue_by_room_type[0].name, "Suite");
        assert_eq!(metrics.revenue_by_room_type[0].amount, 200.0);
        assert_eq!(metrics.overview.cancellation_rate, 33);
        assert_eq!(metrics.booking_trend[1].cancellations, 1);
    }

    #[test]
    fn top_guests_sorted_and_truncated() {
        let mut bookings = Vec::new();
        for i in 0..15u32 {
            let email = format!("guest{i}@example.com");
            bookings.push(guest_booking(&format!("b-{i}"), &email, 1 + i % 5, (i * 37 % 11) as f64 * 10.0));
        }
        // Same guest twice, different case.
        bookings.push(guest_booking("b-x1", "VIP@example.com", 2, 500.0));
        bookings.push(guest_booking("b-x2", "vip@example.com", 3, 700.0));

        let metrics = compute(&bookings, &[], None, range(1, 10));
        let top = &metrics.top_guests;
        assert_eq!(top.len(), TOP_GUEST_LIMIT);
        assert!(top.windows(2).all(|w| w[0].total_spent >= w[1].total_spent));
        assert_eq!(top[0].email, "vip@example.com");
        assert_eq!(top[0].total_spent, 1200.0);
        assert_eq!(top[0].bookings, 2);
        assert_eq!(top[0].name.as_deref(), Some("Guest b-x1"));
    }

    #[test]
    fn timeline_counts_stays_started_before_range() {
        let rooms = vec![room("r-1", "Standard", None, true), room("r-2", "Standard", None, true)];
        let mut void = booking("b-3", "r-2", 5, 7, 80.0);
        void.status = BookingStatus::NoShow;
        let bookings = vec![
            booking("b-1", "r-1", 3, 7, 400.0),
            booking("b-2", "r-2", 6, 8, 200.0),
            void,
        ];
        let metrics = compute(&bookings, &rooms, None, range(5, 8));
        let rates: Vec<Option<u32>> = metrics
            .occupancy_timeline
            .iter()
            .map(|d| d.occupancy_rate)
            .collect();
        assert_eq!(rates, vec![Some(50), Some(100), Some(50), Some(0)]);
        // b-1 checked in before the range so it is not part of the headline figures.
        assert_eq!(metrics.overview.total_bookings, 2);
    }

    #[test]
    fn floor_summary_uses_floor_default() {
        let rooms = vec![
            room("r-1", "Standard", None, true),
            room("r-2", "Standard", Some(1), false),
            room("r-3", "Suite", Some(4), true),
        ];
        let bookings = vec![booking("b-1", "r-3", 1, 2, 100.0)];
        let metrics = compute(&bookings, &rooms, None, range(1, 1));
        assert_eq!(
            metrics.floor_summary,
            vec![
                FloorSummary { floor: 1, total_rooms: 2, active_rooms: 1, occupied_rooms: 0 },
                FloorSummary { floor: 4, total_rooms: 1, active_rooms: 1, occupied_rooms: 1 },
            ]
        );
        assert_eq!(metrics.overview.total_floors, 2);
    }

    #[test]
    fn hotel_fills_overview_fields() {
        let hotel: Hotel = serde_json::from_value(json!({
            "id": "h-1",
            "name": "Harbour View",
            "roomCount": 40,
            "floorCount": 5
        }))
        .unwrap();
        let metrics = compute(&[], &[], Some(&hotel), range(1, 2));
        assert_eq!(metrics.overview.hotel_name.as_deref(), Some("Harbour View"));
        assert_eq!(metrics.overview.total_rooms, 40);
        assert_eq!(metrics.overview.total_floors, 5);
        assert_eq!(metrics.overview.active_rooms, 0);
    }

    #[test]
    fn payment_summary_totals() {
        let b: Booking = serde_json::from_value(json!({
            "id": "b-1",
            "roomId": "r-1",
            "checkIn": day(1).to_string(),
            "totalAmount": "300",
            "payments": [{ "amount": 120.5 }, { "amount": 50, "status": "REFUNDED" }],
            "roomCharges": [{ "description": "Minibar", "amount": "12.25" }]
        }))
        .unwrap();
        let metrics = compute(&[b], &[], None, range(1, 1));
        assert_eq!(metrics.payments.collected, 120.5);
        assert_eq!(metrics.payments.outstanding, 179.5);
        assert_eq!(metrics.payments.room_charges, 12.25);
    }

    #[test]
    fn percent_change_guards_zero_baseline() {
        assert_eq!(percent_change(10.0, 0.0), 0.0);
        assert_eq!(percent_change(15.0, 10.0), 50.0);
        assert_eq!(percent_change(5.0, 10.0), -50.0);
        assert_eq!(percent_change(1.0, 3.0), -66.7);
    }
}
