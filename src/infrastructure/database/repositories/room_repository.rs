//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, update_err};
use crate::domain::room::{Room, RoomRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        number: m.number,
        room_type: m.room_type,
        description: m.description,
        nightly_rate: m.nightly_rate,
        enabled: m.enabled,
    }
}

fn domain_to_active(r: Room) -> room::ActiveModel {
    room::ActiveModel {
        id: if r.id == 0 { NotSet } else { Set(r.id) },
        number: Set(r.number),
        room_type: Set(r.room_type),
        description: Set(r.description),
        nightly_rate: Set(r.nightly_rate),
        enabled: Set(r.enabled),
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        let count = room::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, r: Room) -> DomainResult<Room> {
        debug!("Saving room: id={}, number={}, enabled={}", r.id, r.number, r.enabled);

        let id = r.id;
        let model = domain_to_active(r);
        let saved = if id == 0 {
            model.insert(&self.db).await.map_err(db_err)?
        } else if self.exists_by_id(id).await? {
            model.update(&self.db).await.map_err(update_err("Room", id))?
        } else {
            return Err(DomainError::not_found("Room", id));
        };
        Ok(model_to_domain(saved))
    }

    async fn save_all(&self, rooms: Vec<Room>) -> DomainResult<Vec<Room>> {
        let mut saved = Vec::with_capacity(rooms.len());
        for r in rooms {
            saved.push(self.save(r).await?);
        }
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting room: {}", id);
        let result = room::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Room", id));
        }
        Ok(())
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        let result = room::Entity::delete_many()
            .filter(room::Column::Id.is_in(ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
