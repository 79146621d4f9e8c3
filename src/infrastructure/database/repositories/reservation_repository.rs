//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, update_err};
use crate::domain::reservation::{Reservation, ReservationRepository, ReservationStatus, StayPeriod};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    // Rows are only written through StayPeriod, so this fails only on
    // hand-edited data.
    let stay = StayPeriod::new(m.arrival, m.departure)
        .map_err(|e| DomainError::Storage(format!("reservation {}: {}", m.id, e)))?;
    Ok(Reservation {
        id: m.id,
        client_id: m.client_id,
        room_id: m.room_id,
        stay,
        status: ReservationStatus::from_str(&m.status),
        created_at: m.created_at,
    })
}

fn models_to_domain(models: Vec<reservation::Model>) -> DomainResult<Vec<Reservation>> {
    models.into_iter().map(model_to_domain).collect()
}

fn domain_to_active(r: Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: if r.id == 0 { NotSet } else { Set(r.id) },
        client_id: Set(r.client_id),
        room_id: Set(r.room_id),
        arrival: Set(r.stay.arrival()),
        departure: Set(r.stay.departure()),
        status: Set(r.status.as_str().to_string()),
        created_at: Set(r.created_at),
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        let count = reservation::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .order_by_desc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn find_by_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room_id))
            .order_by_asc(reservation::Column::Arrival)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::ClientId.eq(client_id))
            .order_by_desc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn save(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Saving reservation: id={}, room={}, stay={}", r.id, r.room_id, r.stay);

        let id = r.id;
        let model = domain_to_active(r);
        let saved = if id == 0 {
            model.insert(&self.db).await.map_err(db_err)?
        } else if self.exists_by_id(id).await? {
            model.update(&self.db).await.map_err(update_err("Reservation", id))?
        } else {
            return Err(DomainError::not_found("Reservation", id));
        };
        model_to_domain(saved)
    }

    async fn save_all(&self, reservations: Vec<Reservation>) -> DomainResult<Vec<Reservation>> {
        let mut saved = Vec::with_capacity(reservations.len());
        for r in reservations {
            saved.push(self.save(r).await?);
        }
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting reservation: {}", id);
        let result = reservation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Reservation", id));
        }
        Ok(())
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        let result = reservation::Entity::delete_many()
            .filter(reservation::Column::Id.is_in(ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
