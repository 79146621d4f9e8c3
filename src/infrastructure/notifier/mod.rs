//! Confirmation delivery

pub mod event_bus;

pub use event_bus::EventBusNotifier;
