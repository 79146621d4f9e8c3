//! Reservation repository interface

use async_trait::async_trait;

use super::model::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// All reservations, newest first
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// All reservations booked on a room
    async fn find_by_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>>;

    /// All reservations owned by a client
    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Insert when `id == 0` (the store assigns the id), otherwise replace
    /// the stored record with the same id. A deleted id is never
    /// re-created; saving it fails with `NotFound`.
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation>;

    async fn save_all(&self, reservations: Vec<Reservation>) -> DomainResult<Vec<Reservation>>;

    /// Fails with `NotFound` if nothing was deleted
    async fn delete_by_id(&self, id: i32) -> DomainResult<()>;

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64>;
}
