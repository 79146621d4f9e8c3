//! Per-resource HTTP modules

pub mod clients;
pub mod health;
pub mod metrics;
pub mod notifications;
pub mod reservations;
pub mod rooms;
