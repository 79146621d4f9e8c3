//! Booking request variants and the normalized creation command

use chrono::NaiveDate;

use crate::domain::{DomainResult, StayPeriod};

/// Guest details supplied inline with a full booking
#[derive(Debug, Clone, PartialEq)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_names: String,
    pub email: String,
}

/// A request to book a room
#[derive(Debug, Clone, PartialEq)]
pub enum BookingRequest {
    /// Client and room already exist
    Reference {
        client_id: i32,
        room_id: i32,
        arrival: NaiveDate,
        departure: NaiveDate,
    },
    /// Client and payment are created as part of the booking
    Full {
        guest: GuestDetails,
        card_number: String,
        room_id: i32,
        arrival: NaiveDate,
        departure: NaiveDate,
    },
}

impl BookingRequest {
    pub fn room_id(&self) -> i32 {
        match self {
            Self::Reference { room_id, .. } | Self::Full { room_id, .. } => *room_id,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Reference { .. } => "reference",
            Self::Full { .. } => "full",
        }
    }
}

/// What every request variant is reduced to once its entities exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateReservationCommand {
    pub client_id: i32,
    pub room_id: i32,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
}

impl CreateReservationCommand {
    pub fn stay(&self) -> DomainResult<StayPeriod> {
        StayPeriod::new(self.arrival, self.departure)
    }
}
