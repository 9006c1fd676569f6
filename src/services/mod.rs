//! Fetching, aggregation and background services.

pub mod analytics;
pub mod booking_watch;
pub mod bookings;
pub mod dashboard;
pub mod hotels;
pub mod session;
