//! Room repository interface

use async_trait::async_trait;

use super::model::Room;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// All rooms ordered by id
    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// Insert when `id == 0`, otherwise replace by id (`NotFound` if gone)
    async fn save(&self, room: Room) -> DomainResult<Room>;

    async fn save_all(&self, rooms: Vec<Room>) -> DomainResult<Vec<Room>>;

    async fn delete_by_id(&self, id: i32) -> DomainResult<()>;

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64>;
}
