//! Application layer - use cases on top of the domain

pub mod booking;

pub use booking::{
    Availability, AvailabilityChecker, BookingRejection, BookingRequest, BookingResult,
    CreatedReservation, GuestDetails, RenderedDocument, ReservationService, UpdatedReservation,
};
