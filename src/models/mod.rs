//! Hotel domain records as decoded from the GraphQL API, plus request DTOs.

pub mod booking;
pub mod date_range;
pub mod hotel;
pub mod room;
pub mod wire;
