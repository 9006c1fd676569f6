//! Route definitions for the hotelboard API.

pub mod bookings;
pub mod dashboard;
pub mod health;
pub mod hotel;
pub mod notifications;
pub mod session;
