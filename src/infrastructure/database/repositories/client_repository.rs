//! SeaORM implementation of ClientRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, update_err};
use crate::domain::client::{Client, ClientRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::client;

pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: client::Model) -> Client {
    Client {
        id: m.id,
        first_name: m.first_name,
        last_names: m.last_names,
        email: m.email,
    }
}

fn domain_to_active(c: Client) -> client::ActiveModel {
    client::ActiveModel {
        id: if c.id == 0 { NotSet } else { Set(c.id) },
        first_name: Set(c.first_name),
        last_names: Set(c.last_names),
        email: Set(c.email),
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        let count = client::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Client>> {
        let model = client::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Client>> {
        let models = client::Entity::find()
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, c: Client) -> DomainResult<Client> {
        debug!("Saving client: id={}", c.id);

        let id = c.id;
        let model = domain_to_active(c);
        let saved = if id == 0 {
            model.insert(&self.db).await.map_err(db_err)?
        } else if self.exists_by_id(id).await? {
            model.update(&self.db).await.map_err(update_err("Client", id))?
        } else {
            return Err(DomainError::not_found("Client", id));
        };
        Ok(model_to_domain(saved))
    }

    async fn save_all(&self, clients: Vec<Client>) -> DomainResult<Vec<Client>> {
        let mut saved = Vec::with_capacity(clients.len());
        for c in clients {
            saved.push(self.save(c).await?);
        }
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting client: {}", id);
        let result = client::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Client", id));
        }
        Ok(())
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        let result = client::Entity::delete_many()
            .filter(client::Column::Id.is_in(ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
