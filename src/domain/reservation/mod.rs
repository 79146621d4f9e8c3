//! Reservation aggregate
//!
//! Contains the Reservation entity, the stay period value type, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{Reservation, ReservationChanges, ReservationStatus, StayPeriod};
pub use repository::ReservationRepository;
