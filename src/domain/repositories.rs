//! Repository traits for the domain layer
//!
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::client::ClientRepository;
use super::payment::PaymentRepository;
use super::reservation::ReservationRepository;
use super::room::RoomRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let room = repos.rooms().find_by_id(101).await?;
///     let booked = repos.reservations().find_by_room(101).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn clients(&self) -> &dyn ClientRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
