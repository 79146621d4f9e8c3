//! Outbound ports for artifacts produced after a booking.
//!
//! The booking service calls these; rendering and delivery live in
//! `infrastructure`.

use async_trait::async_trait;

use super::client::Client;
use super::reservation::Reservation;
use super::room::Room;
use super::DomainResult;

/// Everything a confirmation document shows about one booking
#[derive(Debug, Clone)]
pub struct BookingSnapshot {
    pub reservation: Reservation,
    pub client: Client,
    pub room: Room,
}

/// Message handed to the notifier once a booking is persisted
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub reservation: Reservation,
    /// Client contact address
    pub recipient: String,
    pub recipient_name: String,
    /// Rendered confirmation, if rendering succeeded
    pub document: Option<Vec<u8>>,
}

/// Renders a reservation into a retrievable binary document
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    /// MIME type of the rendered bytes
    fn content_type(&self) -> &'static str;

    async fn render(&self, snapshot: &BookingSnapshot) -> DomainResult<Vec<u8>>;
}

/// Best-effort confirmation dispatch; nothing it does is reported back
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, confirmation: Confirmation);
}
