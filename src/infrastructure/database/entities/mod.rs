//! Database entities module

pub mod client;
pub mod payment;
pub mod reservation;
pub mod room;

pub use client::Entity as Client;
pub use payment::Entity as Payment;
pub use reservation::Entity as Reservation;
pub use room::Entity as Room;
