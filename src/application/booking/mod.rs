//! Reservation booking: availability, creation, lifecycle.

pub mod availability;
pub mod rejection;
pub mod request;
pub mod room_locks;
pub mod service;

pub use availability::{Availability, AvailabilityChecker};
pub use rejection::{BookingRejection, BookingResult};
pub use request::{BookingRequest, CreateReservationCommand, GuestDetails};
pub use service::{CreatedReservation, RenderedDocument, ReservationService, UpdatedReservation};
