//! HTTP REST API interfaces
//!
//! - `common`: response envelope, validated JSON extractor, rejection mapping
//! - `modules`: per-resource DTOs and handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use common::{ApiResponse, ValidatedJson};
pub use router::{create_api_router, ApiDoc, ApiState};
