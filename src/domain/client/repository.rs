//! Client repository interface

use async_trait::async_trait;

use super::model::Client;
use crate::domain::DomainResult;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Client>>;

    async fn find_all(&self) -> DomainResult<Vec<Client>>;

    /// Insert when `id == 0`, otherwise replace by id (`NotFound` if gone)
    async fn save(&self, client: Client) -> DomainResult<Client>;

    async fn save_all(&self, clients: Vec<Client>) -> DomainResult<Vec<Client>>;

    async fn delete_by_id(&self, id: i32) -> DomainResult<()>;

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64>;
}
