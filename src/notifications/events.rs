//! Notification events
//!
//! Reservation lifecycle events broadcast to in-process subscribers and to
//! the server-sent event stream.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Reservation;

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A full booking was stored and its confirmation dispatched
    ReservationConfirmed(ReservationConfirmedEvent),
    /// Dates or room of a reservation changed
    ReservationUpdated(ReservationChangedEvent),
    /// A reservation was deleted
    ReservationCancelled(ReservationCancelledEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationConfirmed(_) => "reservation_confirmed",
            Event::ReservationUpdated(_) => "reservation_updated",
            Event::ReservationCancelled(_) => "reservation_cancelled",
        }
    }

    pub fn reservation_id(&self) -> i32 {
        match self {
            Event::ReservationConfirmed(e) => e.reservation_id,
            Event::ReservationUpdated(e) => e.reservation_id,
            Event::ReservationCancelled(e) => e.reservation_id,
        }
    }
}

/// Confirmation sent to a guest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfirmedEvent {
    pub reservation_id: i32,
    pub room_id: i32,
    pub client_id: i32,
    /// Contact address the confirmation is addressed to
    pub recipient: String,
    pub recipient_name: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    /// Size of the attached document, if one was rendered
    pub document_bytes: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationChangedEvent {
    pub reservation_id: i32,
    pub room_id: i32,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
}

impl From<&Reservation> for ReservationChangedEvent {
    fn from(r: &Reservation) -> Self {
        Self {
            reservation_id: r.id,
            room_id: r.room_id,
            arrival: r.stay.arrival(),
            departure: r.stay.departure(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCancelledEvent {
    pub reservation_id: i32,
}

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Envelope delivered to subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    /// Process-wide sequence number
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_type_tag() {
        let msg = EventMessage::new(Event::ReservationCancelled(ReservationCancelledEvent {
            reservation_id: 9,
        }));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "ReservationCancelled");
        assert_eq!(json["data"]["reservation_id"], 9);
        assert!(json["id"].as_u64().is_some());
    }

    #[test]
    fn message_ids_increase() {
        let a = EventMessage::new(Event::ReservationCancelled(ReservationCancelledEvent {
            reservation_id: 1,
        }));
        let b = EventMessage::new(Event::ReservationCancelled(ReservationCancelledEvent {
            reservation_id: 2,
        }));
        assert!(b.id > a.id);
        assert_eq!(b.event.reservation_id(), 2);
    }
}
