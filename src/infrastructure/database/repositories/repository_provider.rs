//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::client::ClientRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::room::RoomRepository;

use super::client_repository::SeaOrmClientRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_id(101).await?;
/// let booked = repos.reservations().find_by_room(101).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    clients: SeaOrmClientRepository,
    rooms: SeaOrmRoomRepository,
    payments: SeaOrmPaymentRepository,
    reservations: SeaOrmReservationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            clients: SeaOrmClientRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn clients(&self) -> &dyn ClientRepository {
        &self.clients
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Client, DomainError, PaymentRecord, Reservation, ReservationStatus, Room, StayPeriod};
    use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};
    use chrono::NaiveDate;

    async fn provider() -> (SeaOrmRepositoryProvider, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotel.db");
        let db = init_database(&DatabaseConfig::sqlite(path.to_str().unwrap()))
            .await
            .unwrap();
        run_migrations(&db).await.unwrap();
        (SeaOrmRepositoryProvider::new(db), dir)
    }

    fn stay(from: u32, to: u32) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 6, from).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, to).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn reservation_round_trip() {
        let (repos, _dir) = provider().await;
        let room = repos.rooms().save(Room::new("101", "standard", 9_000)).await.unwrap();
        let client = repos
            .clients()
            .save(Client::new("Ana", "Pérez", "ana@example.com"))
            .await
            .unwrap();
        assert!(room.id > 0 && client.id > 0);

        let saved = repos
            .reservations()
            .save(Reservation::new(client.id, room.id, stay(1, 5)))
            .await
            .unwrap();
        assert!(saved.id > 0);

        let loaded = repos.reservations().find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.client_id, client.id);
        assert_eq!(loaded.room_id, room.id);
        assert_eq!(loaded.stay, stay(1, 5));
        assert_eq!(loaded.status, ReservationStatus::Confirmed);

        assert_eq!(repos.reservations().find_by_room(room.id).await.unwrap().len(), 1);
        assert_eq!(repos.reservations().find_by_client(client.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_with_id_replaces_row() {
        let (repos, _dir) = provider().await;
        let mut room = repos.rooms().save(Room::new("102", "suite", 20_000)).await.unwrap();
        room.disable();
        repos.rooms().save(room.clone()).await.unwrap();

        let all = repos.rooms().find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].enabled);
    }

    #[tokio::test]
    async fn deletes_report_missing_rows() {
        let (repos, _dir) = provider().await;
        let client = repos
            .clients()
            .save(Client::new("Luis", "Gómez", "luis@example.com"))
            .await
            .unwrap();
        let payment = repos
            .payments()
            .save(PaymentRecord::new(client.id, "4111 1111 1111 1111").unwrap())
            .await
            .unwrap();
        assert_eq!(payment.masked_card, "**** **** **** 1111");

        repos.payments().delete_by_id(payment.id).await.unwrap();
        assert!(matches!(
            repos.payments().delete_by_id(payment.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(repos.clients().delete_all(&[client.id, 999]).await.unwrap(), 1);
        assert!(!repos.clients().exists_by_id(client.id).await.unwrap());
    }

    #[tokio::test]
    async fn save_does_not_resurrect_deleted_rows() {
        let (repos, _dir) = provider().await;
        let room = repos.rooms().save(Room::new("103", "standard", 9_000)).await.unwrap();
        let client = repos
            .clients()
            .save(Client::new("Eva", "Ruiz", "eva@example.com"))
            .await
            .unwrap();
        let saved = repos
            .reservations()
            .save(Reservation::new(client.id, room.id, stay(1, 5)))
            .await
            .unwrap();

        let mut stale = repos.reservations().find_by_id(saved.id).await.unwrap().unwrap();
        repos.reservations().delete_by_id(saved.id).await.unwrap();

        stale.stay = stay(2, 6);
        assert!(matches!(
            repos.reservations().save(stale).await,
            Err(DomainError::NotFound { entity: "Reservation", .. })
        ));
        assert!(!repos.reservations().exists_by_id(saved.id).await.unwrap());

        let mut gone = client.clone();
        repos.clients().delete_by_id(client.id).await.unwrap();
        gone.email = "eva@hotel.example".to_string();
        assert!(matches!(
            repos.clients().save(gone).await,
            Err(DomainError::NotFound { entity: "Client", .. })
        ));
    }
}
