use serde::{Deserialize, Serialize};

use crate::models::wire;

/// Housekeeping / availability state of a room.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Cleaning,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
            Self::Cleaning => "Cleaning",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default, rename = "type")]
    pub room_type: Option<String>,
    #[serde(default = "wire::default_floor", deserialize_with = "wire::floor")]
    pub floor: i32,
    #[serde(default)]
    pub max_occupancy: Option<u32>,
    #[serde(default)]
    pub base_occupancy: Option<u32>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub status: RoomStatus,
    #[serde(default = "wire::default_true", deserialize_with = "wire::flag_or_true")]
    pub is_active: bool,
}

impl Room {
    pub const UNKNOWN_TYPE: &'static str = "Unknown";

    pub fn type_label(&self) -> &str {
        self.room_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(Self::UNKNOWN_TYPE)
    }
}
