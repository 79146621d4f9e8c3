//! Domain layer: entities, value types, repository and port traits.

pub mod client;
pub mod payment;
pub mod ports;
pub mod repositories;
pub mod reservation;
pub mod room;

pub use client::Client;
pub use payment::PaymentRecord;
pub use ports::{BookingSnapshot, Confirmation, DocumentGenerator, Notifier};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{Reservation, ReservationChanges, ReservationStatus, StayPeriod};
pub use room::Room;

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
