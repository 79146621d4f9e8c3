//! Reasons a booking operation can be turned down

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRejection {
    #[error("Room {0} not found")]
    RoomNotFound(i32),

    #[error("Room {0} is disabled")]
    RoomDisabled(i32),

    #[error("Room {room_id} is already booked by reservation {conflicting_reservation} for an overlapping stay")]
    Overlap {
        room_id: i32,
        conflicting_reservation: i32,
    },

    #[error("Client {0} not found")]
    ClientNotFound(i32),

    #[error("Client could not be created: {0}")]
    ClientCreationFailed(String),

    #[error("Payment record could not be created: {0}")]
    PaymentCreationFailed(String),

    #[error("Reservation {0} not found")]
    ReservationNotFound(i32),

    #[error("Invalid stay: {0}")]
    InvalidStay(String),

    #[error("Confirmation document failed: {0}")]
    DocumentFailed(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl BookingRejection {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoomNotFound(_) => "room_not_found",
            Self::RoomDisabled(_) => "room_disabled",
            Self::Overlap { .. } => "overlap",
            Self::ClientNotFound(_) => "client_not_found",
            Self::ClientCreationFailed(_) => "client_creation_failed",
            Self::PaymentCreationFailed(_) => "payment_creation_failed",
            Self::ReservationNotFound(_) => "reservation_not_found",
            Self::InvalidStay(_) => "invalid_stay",
            Self::DocumentFailed(_) => "document_failed",
            Self::StoreFailure(_) => "store_failure",
        }
    }
}

/// Repository errors reaching the booking layer are opaque store failures,
/// except validation errors which only come from `StayPeriod`.
impl From<DomainError> for BookingRejection {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => Self::InvalidStay(msg),
            other => Self::StoreFailure(other.to_string()),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingRejection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_opaque() {
        let r: BookingRejection = DomainError::Storage("disk full".into()).into();
        assert_eq!(r.kind(), "store_failure");
        assert!(r.to_string().contains("disk full"));
    }

    #[test]
    fn validation_errors_become_invalid_stay() {
        let r: BookingRejection = DomainError::Validation("bad dates".into()).into();
        assert_eq!(r, BookingRejection::InvalidStay("bad dates".into()));
    }
}
