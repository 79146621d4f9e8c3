//! Payment record aggregate
//!
//! Card data is stored masked and never settled.

pub mod model;
pub mod repository;

pub use model::{mask_card_number, PaymentRecord};
pub use repository::PaymentRepository;
