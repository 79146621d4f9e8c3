//! Broadcast bus for reservation events.
//!
//! Every subscriber sees every message published after it subscribed.
//! A subscriber may narrow its view to a single reservation; filtering
//! happens on the receiving side so publishing stays one `send`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use super::events::{Event, EventMessage};

/// Messages buffered per subscriber before the slowest one starts losing them
const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
    subscribers: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscribers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Stamp and broadcast an event. Returns how many subscribers were
    /// attached when it was sent.
    pub fn publish(&self, event: Event) -> usize {
        let message = EventMessage::new(event);
        let (seq, kind, reservation_id) = (
            message.id,
            message.event.event_type(),
            message.event.reservation_id(),
        );

        metrics::counter!("reservation_events_published_total", "type" => kind).increment(1);
        let delivered = self.sender.send(message).unwrap_or(0);
        debug!(
            "Event #{} {} for reservation {} -> {} subscriber(s)",
            seq, kind, reservation_id, delivered
        );
        delivered
    }

    /// Receive every event.
    pub fn subscribe(&self) -> EventSubscriber {
        self.attach(None)
    }

    /// Receive only the events of one reservation.
    pub fn subscribe_to(&self, reservation_id: i32) -> EventSubscriber {
        self.attach(Some(reservation_id))
    }

    fn attach(&self, reservation_id: Option<i32>) -> EventSubscriber {
        let total = self.subscribers.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "Event subscriber attached (reservation filter: {:?}), total: {}",
            reservation_id, total
        );

        EventSubscriber {
            receiver: self.sender.subscribe(),
            reservation_id,
            missed: 0,
            subscribers: self.subscribers.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of the bus. Detaches itself on drop.
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    reservation_id: Option<i32>,
    missed: u64,
    subscribers: Arc<AtomicUsize>,
}

impl EventSubscriber {
    fn wants(&self, message: &EventMessage) -> bool {
        self.reservation_id
            .map_or(true, |id| message.event.reservation_id() == id)
    }

    fn record_lag(&mut self, count: u64) {
        self.missed += count;
        metrics::counter!("reservation_events_missed_total").increment(count);
        warn!("Event subscriber fell behind, {} event(s) dropped", count);
    }

    /// Next matching event; `None` once the bus is gone. Lagging skips
    /// ahead instead of failing.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) if self.wants(&message) => return Some(message),
                Ok(_) => {}
                Err(RecvError::Lagged(count)) => self.record_lag(count),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event already buffered, without waiting.
    pub fn try_recv(&mut self) -> Option<EventMessage> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) if self.wants(&message) => return Some(message),
                Ok(_) => {}
                Err(TryRecvError::Lagged(count)) => self.record_lag(count),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Events dropped because this subscriber fell behind
    pub fn missed(&self) -> u64 {
        self.missed
    }
}

impl Drop for EventSubscriber {
    fn drop(&mut self) {
        let left = self.subscribers.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        info!("Event subscriber detached, remaining: {}", left);
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::events::ReservationCancelledEvent;

    fn cancelled(reservation_id: i32) -> Event {
        Event::ReservationCancelled(ReservationCancelledEvent { reservation_id })
    }

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut subscriber = bus.subscribe();

        assert_eq!(bus.publish(cancelled(4)), 1);

        let received = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            subscriber.recv(),
        )
        .await
        .expect("Timeout")
        .expect("No message");

        assert_eq!(received.event.event_type(), "reservation_cancelled");
        assert_eq!(received.event.reservation_id(), 4);
    }

    #[test]
    fn publish_without_subscribers_reaches_nobody() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(cancelled(1)), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn filtered_subscriber_skips_other_reservations() {
        let bus = EventBus::new();
        let mut all = bus.subscribe();
        let mut only_seven = bus.subscribe_to(7);

        bus.publish(cancelled(3));
        bus.publish(cancelled(7));

        assert_eq!(all.try_recv().unwrap().event.reservation_id(), 3);
        assert_eq!(all.try_recv().unwrap().event.reservation_id(), 7);
        assert_eq!(only_seven.try_recv().unwrap().event.reservation_id(), 7);
        assert!(only_seven.try_recv().is_none());
    }

    #[test]
    fn lagging_subscriber_skips_ahead_and_counts_losses() {
        let bus = EventBus::with_capacity(2);
        let mut slow = bus.subscribe();

        for id in 1..=5 {
            bus.publish(cancelled(id));
        }

        assert_eq!(slow.try_recv().unwrap().event.reservation_id(), 4);
        assert_eq!(slow.missed(), 3);
        assert_eq!(slow.try_recv().unwrap().event.reservation_id(), 5);
        assert!(slow.try_recv().is_none());
    }

    #[test]
    fn subscriber_count_tracks_drops() {
        let bus = EventBus::new();
        let sub1 = bus.subscribe();
        let _sub2 = bus.subscribe_to(1);
        assert_eq!(bus.subscriber_count(), 2);

        drop(sub1);
        assert_eq!(bus.subscriber_count(), 1);
    }
}
