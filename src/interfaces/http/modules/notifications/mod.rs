//! Server-sent event stream of reservation events

pub mod handlers;

pub use handlers::*;
