//! Payment repository interface

use async_trait::async_trait;

use super::model::PaymentRecord;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PaymentRecord>>;

    async fn find_all(&self) -> DomainResult<Vec<PaymentRecord>>;

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<PaymentRecord>>;

    /// Insert when `id == 0`, otherwise replace by id (`NotFound` if gone)
    async fn save(&self, payment: PaymentRecord) -> DomainResult<PaymentRecord>;

    async fn save_all(&self, payments: Vec<PaymentRecord>) -> DomainResult<Vec<PaymentRecord>>;

    async fn delete_by_id(&self, id: i32) -> DomainResult<()>;

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64>;
}
