//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod client_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod room_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Update errors for a row that vanished between the existence check and
/// the write surface as `NotFound`, like a missing id.
pub(crate) fn update_err(entity: &'static str, id: i32) -> impl Fn(sea_orm::DbErr) -> DomainError {
    move |e| match e {
        sea_orm::DbErr::RecordNotUpdated => DomainError::not_found(entity, id),
        other => db_err(other),
    }
}
