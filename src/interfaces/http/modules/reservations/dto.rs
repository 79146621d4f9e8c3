//! Reservation DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{BookingRequest, GuestDetails};
use crate::domain::{Reservation, ReservationChanges};
use crate::interfaces::http::modules::clients::ClientDto;

/// Book a room for an existing client
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(range(min = 1))]
    pub client_id: i32,
    #[validate(range(min = 1))]
    pub room_id: i32,
    /// First night (YYYY-MM-DD)
    pub arrival: NaiveDate,
    /// Checkout day, exclusive (YYYY-MM-DD)
    pub departure: NaiveDate,
}

impl From<CreateReservationRequest> for BookingRequest {
    fn from(r: CreateReservationRequest) -> Self {
        BookingRequest::Reference {
            client_id: r.client_id,
            room_id: r.room_id,
            arrival: r.arrival,
            departure: r.departure,
        }
    }
}

/// Book a room for a new guest, registering the guest and card on the way
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FullReservationRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub last_names: String,
    #[validate(email)]
    pub email: String,
    /// Card number; only the last four digits are stored
    #[validate(length(min = 12, max = 25))]
    pub card_number: String,
    #[validate(range(min = 1))]
    pub room_id: i32,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
}

impl From<FullReservationRequest> for BookingRequest {
    fn from(r: FullReservationRequest) -> Self {
        BookingRequest::Full {
            guest: GuestDetails {
                first_name: r.first_name,
                last_names: r.last_names,
                email: r.email,
            },
            card_number: r.card_number,
            room_id: r.room_id,
            arrival: r.arrival,
            departure: r.departure,
        }
    }
}

/// Partial update; omitted fields keep their current value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    pub arrival: Option<NaiveDate>,
    pub departure: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub room_id: Option<i32>,
}

impl From<UpdateReservationRequest> for ReservationChanges {
    fn from(r: UpdateReservationRequest) -> Self {
        ReservationChanges {
            arrival: r.arrival,
            departure: r.departure,
            room_id: r.room_id,
        }
    }
}

/// Reservation details in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub client_id: i32,
    pub room_id: i32,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub nights: i64,
    pub status: String,
    pub created_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            client_id: r.client_id,
            room_id: r.room_id,
            arrival: r.stay.arrival(),
            departure: r.stay.departure(),
            nights: r.stay.nights(),
            status: r.status.to_string(),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Result of a full booking
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FullReservationResponse {
    pub reservation: ReservationDto,
    pub client: ClientDto,
    /// Base64-encoded confirmation document, absent if rendering failed
    pub document: Option<String>,
}
