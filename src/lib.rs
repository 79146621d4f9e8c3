//! # Hotel Back Office
//!
//! Room reservation back office: availability checks, booking with
//! inline guest registration, reservation lifecycle and confirmation
//! documents.
//!
//! ## Architecture
//!
//! - **domain**: entities, value types, repository and port traits
//! - **application**: booking service and availability rules
//! - **infrastructure**: SeaORM and in-memory stores, document rendering,
//!   notification delivery
//! - **interfaces**: REST API with Swagger documentation
//! - **notifications**: in-process event bus
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{BookingRejection, BookingRequest, ReservationService};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;

pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
