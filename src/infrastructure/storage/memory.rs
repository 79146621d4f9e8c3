//! In-memory repository implementations
//!
//! Every aggregate lives in its own `DashMap` table with a monotonically
//! increasing id counter. A table can be switched "unavailable" to simulate
//! a store outage; every call then fails with `DomainError::Storage`.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::client::ClientRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::room::RoomRepository;
use crate::domain::{
    Client, DomainError, DomainResult, PaymentRecord, RepositoryProvider, Reservation, Room,
};

/// Entities stored in an [`InMemoryTable`]
pub trait Keyed: Clone + Send + Sync {
    const ENTITY: &'static str;
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

macro_rules! keyed {
    ($ty:ty, $name:literal) => {
        impl Keyed for $ty {
            const ENTITY: &'static str = $name;
            fn id(&self) -> i32 {
                self.id
            }
            fn set_id(&mut self, id: i32) {
                self.id = id;
            }
        }
    };
}

keyed!(Client, "Client");
keyed!(Room, "Room");
keyed!(PaymentRecord, "Payment");
keyed!(Reservation, "Reservation");

/// One table of the in-memory store
pub struct InMemoryTable<T: Keyed> {
    rows: DashMap<i32, T>,
    counter: AtomicI32,
    unavailable: AtomicBool,
}

impl<T: Keyed> InMemoryTable<T> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            counter: AtomicI32::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Storage(format!(
                "{} store unavailable",
                T::ENTITY
            )));
        }
        Ok(())
    }

    fn exists(&self, id: i32) -> DomainResult<bool> {
        self.check()?;
        Ok(self.rows.contains_key(&id))
    }

    fn get(&self, id: i32) -> DomainResult<Option<T>> {
        self.check()?;
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    /// Rows matching `filter`, ordered by id ascending
    fn select(&self, filter: impl Fn(&T) -> bool) -> DomainResult<Vec<T>> {
        self.check()?;
        let mut rows: Vec<T> = self
            .rows
            .iter()
            .filter(|r| filter(r.value()))
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by_key(|r| r.id());
        Ok(rows)
    }

    fn upsert(&self, mut row: T) -> DomainResult<T> {
        self.check()?;
        if row.id() == 0 {
            row.set_id(self.counter.fetch_add(1, Ordering::SeqCst));
        } else if !self.rows.contains_key(&row.id()) {
            return Err(DomainError::not_found(T::ENTITY, row.id()));
        }
        self.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    fn upsert_all(&self, rows: Vec<T>) -> DomainResult<Vec<T>> {
        rows.into_iter().map(|r| self.upsert(r)).collect()
    }

    fn remove(&self, id: i32) -> DomainResult<()> {
        self.check()?;
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(T::ENTITY, id))
    }

    fn remove_all(&self, ids: &[i32]) -> DomainResult<u64> {
        self.check()?;
        Ok(ids.iter().filter(|id| self.rows.remove(*id).is_some()).count() as u64)
    }
}

impl<T: Keyed> Default for InMemoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Repository provider backed by process memory
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    pub clients: InMemoryTable<Client>,
    pub rooms: InMemoryTable<Room>,
    pub payments: InMemoryTable<PaymentRecord>,
    pub reservations: InMemoryTable<Reservation>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

#[async_trait]
impl ClientRepository for InMemoryTable<Client> {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        self.exists(id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Client>> {
        self.get(id)
    }

    async fn find_all(&self) -> DomainResult<Vec<Client>> {
        self.select(|_| true)
    }

    async fn save(&self, client: Client) -> DomainResult<Client> {
        self.upsert(client)
    }

    async fn save_all(&self, clients: Vec<Client>) -> DomainResult<Vec<Client>> {
        self.upsert_all(clients)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        self.remove(id)
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        self.remove_all(ids)
    }
}

#[async_trait]
impl RoomRepository for InMemoryTable<Room> {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        self.exists(id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        self.get(id)
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        self.select(|_| true)
    }

    async fn save(&self, room: Room) -> DomainResult<Room> {
        self.upsert(room)
    }

    async fn save_all(&self, rooms: Vec<Room>) -> DomainResult<Vec<Room>> {
        self.upsert_all(rooms)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        self.remove(id)
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        self.remove_all(ids)
    }
}

#[async_trait]
impl PaymentRepository for InMemoryTable<PaymentRecord> {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        self.exists(id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PaymentRecord>> {
        self.get(id)
    }

    async fn find_all(&self) -> DomainResult<Vec<PaymentRecord>> {
        self.select(|_| true)
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<PaymentRecord>> {
        self.select(|p| p.client_id == client_id)
    }

    async fn save(&self, payment: PaymentRecord) -> DomainResult<PaymentRecord> {
        self.upsert(payment)
    }

    async fn save_all(&self, payments: Vec<PaymentRecord>) -> DomainResult<Vec<PaymentRecord>> {
        self.upsert_all(payments)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        self.remove(id)
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        self.remove_all(ids)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryTable<Reservation> {
    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        self.exists(id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        self.get(id)
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let mut all = self.select(|_| true)?;
        all.reverse();
        Ok(all)
    }

    async fn find_by_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>> {
        self.select(|r| r.room_id == room_id)
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
        self.select(|r| r.client_id == client_id)
    }

    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation> {
        self.upsert(reservation)
    }

    async fn save_all(&self, reservations: Vec<Reservation>) -> DomainResult<Vec<Reservation>> {
        self.upsert_all(reservations)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        self.remove(id)
    }

    async fn delete_all(&self, ids: &[i32]) -> DomainResult<u64> {
        self.remove_all(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StayPeriod;
    use chrono::NaiveDate;

    fn stay(from: u32, to: u32) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 6, from).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, to).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repos = InMemoryRepositoryProvider::new();
        let a = repos.rooms().save(Room::new("101", "standard", 100)).await.unwrap();
        let b = repos.rooms().save(Room::new("102", "standard", 100)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert!(repos.rooms().exists_by_id(2).await.unwrap());
    }

    #[tokio::test]
    async fn save_with_id_replaces_existing_row() {
        let repos = InMemoryRepositoryProvider::new();
        let mut room = repos.rooms().save(Room::new("101", "standard", 100)).await.unwrap();
        room.disable();
        repos.rooms().save(room.clone()).await.unwrap();

        let stored = repos.rooms().find_by_id(room.id).await.unwrap().unwrap();
        assert!(!stored.enabled);
        assert_eq!(repos.rooms.len(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_fails() {
        let repos = InMemoryRepositoryProvider::new();
        let mut room = Room::new("101", "standard", 100);
        room.id = 42;
        assert!(matches!(
            repos.rooms().save(room).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn reservations_filter_by_room_and_list_newest_first() {
        let repos = InMemoryRepositoryProvider::new();
        let saved = repos
            .reservations()
            .save_all(vec![
                Reservation::new(1, 101, stay(1, 5)),
                Reservation::new(2, 102, stay(1, 5)),
                Reservation::new(3, 101, stay(6, 8)),
            ])
            .await
            .unwrap();
        assert_eq!(saved.len(), 3);

        let for_room = repos.reservations().find_by_room(101).await.unwrap();
        assert_eq!(for_room.iter().map(|r| r.client_id).collect::<Vec<_>>(), vec![1, 3]);

        let all = repos.reservations().find_all().await.unwrap();
        assert_eq!(all.first().map(|r| r.id), Some(3));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found_and_delete_all_counts() {
        let repos = InMemoryRepositoryProvider::new();
        assert!(repos.clients().delete_by_id(9).await.is_err());

        let a = repos.clients().save(Client::new("A", "B", "a@b.c")).await.unwrap();
        let removed = repos.clients().delete_all(&[a.id, 99]).await.unwrap();
        assert_eq!(removed, 1);
        assert!(repos.clients.is_empty());
    }

    #[tokio::test]
    async fn unavailable_table_fails_every_call() {
        let repos = InMemoryRepositoryProvider::new();
        repos.payments.set_unavailable(true);
        let err = repos.payments().find_all().await.unwrap_err();
        assert!(err.is_storage());

        repos.payments.set_unavailable(false);
        assert!(repos.payments().find_all().await.unwrap().is_empty());
    }
}
