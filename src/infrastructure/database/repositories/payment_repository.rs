//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, update_err};
use crate::domain::payment::{PaymentRecord, PaymentRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: payment::Model) -> PaymentRecord {
    PaymentRecord {
        id: m.id,
        client_id: m.client_id,
        masked_card: m.masked_card,
        created_at: m.created_at,
    }
}

fn domain_to_active(p: PaymentRecord) -> payment::ActiveModel {
    payment::ActiveModel {
        id: if p.id == 0 { NotSet } else { Set(p.id) },
        client_id: Set(p.client_id),
        masked_card: Set(p.masked_card),
        created_at: Set(p.created_at),
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        let count = payment::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PaymentRecord>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<PaymentRecord>> {
        let models = payment::Entity::find()
            .order_by_asc(payment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<PaymentRecord>> {
        let models = payment::Entity::find()
            .filter(payment::Column::ClientId.eq(client_id))
            .order_by_asc(payment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, p: PaymentRecord) -> DomainResult<PaymentRecord> {
        debug!("Saving payment: id={}, client={}", p.id, p.client_id);

        let id = p.id;
        let model = domain_to_active(p);
        let saved = if id == 0 {
            model.insert(&self.db).await.map_err(db_err)?
        } else if self.exists_by_id(id).await? {
            model.update(&self.db).await.map_err(update_err("Payment", id))?
        } else {
            return Err(DomainError::not_found("Payment", id));
        };
        Ok(model_to_domain(saved))
    }

    async fn save_all(&self, payments: Vec<PaymentRecord>) -> DomainResult<Vec<PaymentRecord>> {
        let mut saved = Vec::with_capacity(payments.len());
        for p in payments {
            saved.push(self.save(p).await?);
        }
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting payment: {}", id);
        let result = payment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Payment", id));
        }
        Ok(())
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        let result = payment::Entity::delete_many()
            .filter(payment::Column::Id.is_in(ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
