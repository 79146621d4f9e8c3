//! Notifier that hands confirmations to the in-process event bus.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{Confirmation, Notifier};
use crate::notifications::{Event, ReservationConfirmedEvent, SharedEventBus};

pub struct EventBusNotifier {
    event_bus: SharedEventBus,
}

impl EventBusNotifier {
    pub fn new(event_bus: SharedEventBus) -> Self {
        Self { event_bus }
    }
}

#[async_trait]
impl Notifier for EventBusNotifier {
    async fn send(&self, confirmation: Confirmation) {
        let reservation = &confirmation.reservation;
        let listeners = self
            .event_bus
            .publish(Event::ReservationConfirmed(ReservationConfirmedEvent {
                reservation_id: reservation.id,
                room_id: reservation.room_id,
                client_id: reservation.client_id,
                recipient: confirmation.recipient.clone(),
                recipient_name: confirmation.recipient_name.clone(),
                arrival: reservation.stay.arrival(),
                departure: reservation.stay.departure(),
                document_bytes: confirmation.document.as_ref().map(Vec::len),
            }));

        info!(
            reservation_id = reservation.id,
            recipient = %confirmation.recipient,
            with_document = confirmation.document.is_some(),
            listeners,
            "Reservation confirmation dispatched"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Reservation, StayPeriod};
    use crate::notifications::create_event_bus;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn publishes_confirmed_event() {
        let bus = create_event_bus();
        let mut subscriber = bus.subscribe();
        let notifier = EventBusNotifier::new(bus.clone());

        let stay = StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        )
        .unwrap();
        let mut reservation = Reservation::new(2, 101, stay);
        reservation.id = 5;

        notifier
            .send(Confirmation {
                reservation,
                recipient: "ana@example.com".to_string(),
                recipient_name: "Ana".to_string(),
                document: Some(vec![1, 2, 3]),
            })
            .await;

        let msg = subscriber.recv().await.unwrap();
        match msg.event {
            Event::ReservationConfirmed(e) => {
                assert_eq!(e.reservation_id, 5);
                assert_eq!(e.room_id, 101);
                assert_eq!(e.recipient, "ana@example.com");
                assert_eq!(e.document_bytes, Some(3));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
