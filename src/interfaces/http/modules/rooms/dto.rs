//! Room DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Room;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub number: String,
    pub room_type: String,
    pub description: Option<String>,
    /// Price per night in minor currency units
    pub nightly_rate: i64,
    pub enabled: bool,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            number: r.number,
            room_type: r.room_type,
            description: r.description,
            nightly_rate: r.nightly_rate,
            enabled: r.enabled,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    #[validate(length(min = 1, max = 50))]
    pub room_type: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub nightly_rate: i64,
    /// Defaults to true
    pub enabled: Option<bool>,
}

impl From<CreateRoomRequest> for Room {
    fn from(r: CreateRoomRequest) -> Self {
        let mut room = Room::new(r.number, r.room_type, r.nightly_rate);
        room.description = r.description;
        if r.enabled == Some(false) {
            room.disable();
        }
        room
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetRoomEnabledRequest {
    pub enabled: bool,
}

/// Stay to search free rooms for
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// First night (YYYY-MM-DD)
    pub arrival: NaiveDate,
    /// Checkout day, exclusive (YYYY-MM-DD)
    pub departure: NaiveDate,
    /// Case-insensitive room type filter
    pub room_type: Option<String>,
}
