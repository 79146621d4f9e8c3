//! Notifications module
//!
//! In-process pub/sub for reservation lifecycle events. The HTTP layer
//! exposes the bus as a server-sent event stream at
//! `/api/v1/notifications/stream`.
//!
//! ```ignore
//! use hotel_backoffice::notifications::{create_event_bus, Event, ReservationCancelledEvent};
//!
//! let event_bus = create_event_bus();
//! event_bus.publish(Event::ReservationCancelled(ReservationCancelledEvent {
//!     reservation_id: 42,
//! }));
//! ```

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
