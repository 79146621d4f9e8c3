//! Reservation booking and lifecycle service
//!
//! Creates reservations from booking requests, updates and cancels them,
//! and renders confirmation documents on demand.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

use crate::config::BookingConfig;
use crate::domain::{
    BookingSnapshot, Client, Confirmation, DocumentGenerator, DomainError, Notifier, PaymentRecord,
    RepositoryProvider, Reservation, ReservationChanges, ReservationStatus, Room, StayPeriod,
};

use super::availability::AvailabilityChecker;
use super::rejection::{BookingRejection, BookingResult};
use super::request::{BookingRequest, CreateReservationCommand, GuestDetails};
use super::room_locks::RoomLocks;

/// Outcome of a successful booking
#[derive(Debug, Clone)]
pub struct CreatedReservation {
    pub reservation: Reservation,
    pub client: Client,
    /// Confirmation document, rendered for full bookings only
    pub document: Option<Vec<u8>>,
}

/// Outcome of a successful update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedReservation {
    pub reservation: Reservation,
    /// `false` when room and dates were already as requested
    pub changed: bool,
}

/// Rendered confirmation returned by [`ReservationService::fetch_document`]
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    checker: AvailabilityChecker,
    documents: Arc<dyn DocumentGenerator>,
    notifier: Arc<dyn Notifier>,
    locks: RoomLocks,
    policy: BookingConfig,
}

impl ReservationService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        documents: Arc<dyn DocumentGenerator>,
        notifier: Arc<dyn Notifier>,
        policy: BookingConfig,
    ) -> Self {
        Self {
            checker: AvailabilityChecker::new(repos.clone()),
            repos,
            documents,
            notifier,
            locks: RoomLocks::new(),
            policy,
        }
    }

    // ── Creation ───────────────────────────────────────────────

    /// Book a room.
    ///
    /// Full bookings create the client and payment first, then render a
    /// confirmation and notify the client once the reservation is stored.
    pub async fn create(&self, request: BookingRequest) -> BookingResult<CreatedReservation> {
        let mode = request.mode();
        let room_id = request.room_id();

        let result = match request {
            BookingRequest::Reference {
                client_id,
                room_id,
                arrival,
                departure,
            } => {
                self.create_from_reference(CreateReservationCommand {
                    client_id,
                    room_id,
                    arrival,
                    departure,
                })
                .await
            }
            BookingRequest::Full {
                guest,
                card_number,
                room_id,
                arrival,
                departure,
            } => {
                self.create_full(guest, &card_number, room_id, arrival, departure)
                    .await
            }
        };

        match &result {
            Ok(created) => {
                metrics::counter!("reservations_created_total", "mode" => mode).increment(1);
                info!(
                    reservation_id = created.reservation.id,
                    room_id,
                    client_id = created.client.id,
                    stay = %created.reservation.stay,
                    mode,
                    "Reservation created"
                );
            }
            Err(reason) => {
                metrics::counter!("reservations_rejected_total", "reason" => reason.kind())
                    .increment(1);
                warn!(room_id, mode, reason = %reason, "Reservation rejected");
            }
        }

        result
    }

    async fn create_from_reference(
        &self,
        command: CreateReservationCommand,
    ) -> BookingResult<CreatedReservation> {
        command.stay()?;
        let room = self.resolve_room(command.room_id).await?;
        let client = self.resolve_client(command.client_id).await?;

        let reservation = self.place(command, &room).await?;

        Ok(CreatedReservation {
            reservation,
            client,
            document: None,
        })
    }

    async fn create_full(
        &self,
        guest: GuestDetails,
        card_number: &str,
        room_id: i32,
        arrival: NaiveDate,
        departure: NaiveDate,
    ) -> BookingResult<CreatedReservation> {
        // Dates are request validation; nothing is written for a bad stay.
        StayPeriod::new(arrival, departure)?;

        let client = self
            .repos
            .clients()
            .save(Client::new(guest.first_name, guest.last_names, guest.email))
            .await
            .map_err(|e| BookingRejection::ClientCreationFailed(e.to_string()))?;

        let payment = match self.create_payment(client.id, card_number).await {
            Ok(payment) => payment,
            Err(reason) => {
                self.compensate(client.id, None).await;
                return Err(reason);
            }
        };

        let command = CreateReservationCommand {
            client_id: client.id,
            room_id,
            arrival,
            departure,
        };
        let booked = match self.resolve_room(command.room_id).await {
            Ok(room) => self
                .place(command, &room)
                .await
                .map(|reservation| (reservation, room)),
            Err(reason) => Err(reason),
        };

        let (reservation, room) = match booked {
            Ok(booked) => booked,
            Err(reason) => {
                self.compensate(client.id, Some(payment.id)).await;
                return Err(reason);
            }
        };

        let document = self.send_confirmation(&reservation, &client, &room).await;

        Ok(CreatedReservation {
            reservation,
            client,
            document,
        })
    }

    async fn create_payment(&self, client_id: i32, card_number: &str) -> BookingResult<PaymentRecord> {
        let payment = PaymentRecord::new(client_id, card_number)
            .map_err(|e| BookingRejection::PaymentCreationFailed(e.to_string()))?;

        self.repos
            .payments()
            .save(payment)
            .await
            .map_err(|e| BookingRejection::PaymentCreationFailed(e.to_string()))
    }

    /// Undo the writes of a failed full booking, unless the policy keeps them.
    async fn compensate(&self, client_id: i32, payment_id: Option<i32>) {
        if !self.policy.rollback_partial_failures {
            warn!(
                client_id,
                ?payment_id,
                "Full booking failed; client and payment left in place"
            );
            return;
        }

        if let Some(payment_id) = payment_id {
            if let Err(e) = self.repos.payments().delete_by_id(payment_id).await {
                warn!(payment_id, error = %e, "Failed to roll back payment record");
            }
        }
        if let Err(e) = self.repos.clients().delete_by_id(client_id).await {
            warn!(client_id, error = %e, "Failed to roll back client");
        }
        debug!(client_id, ?payment_id, "Rolled back partial full booking");
    }

    /// Availability check and insert for a normalized command, serialized
    /// per room when enabled.
    async fn place(&self, command: CreateReservationCommand, room: &Room) -> BookingResult<Reservation> {
        let stay = command.stay()?;
        let _guard = self.lock_room(room.id).await;

        self.checker.check(room, &stay, None).await?.into_result()?;

        self.repos
            .reservations()
            .save(Reservation::new(command.client_id, room.id, stay))
            .await
            .map_err(|e| BookingRejection::StoreFailure(e.to_string()))
    }

    /// Render and dispatch the confirmation. Failures here never undo the
    /// reservation.
    async fn send_confirmation(
        &self,
        reservation: &Reservation,
        client: &Client,
        room: &Room,
    ) -> Option<Vec<u8>> {
        let snapshot = BookingSnapshot {
            reservation: reservation.clone(),
            client: client.clone(),
            room: room.clone(),
        };

        let document = match self.documents.render(&snapshot).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(
                    reservation_id = reservation.id,
                    error = %e,
                    "Confirmation document could not be rendered"
                );
                None
            }
        };

        self.notifier
            .send(Confirmation {
                reservation: reservation.clone(),
                recipient: client.email.clone(),
                recipient_name: client.full_name(),
                document: document.clone(),
            })
            .await;

        document
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Apply a partial change and re-validate availability.
    ///
    /// The reservation never conflicts with its own stored version. An
    /// update that changes neither room nor dates books nothing new and
    /// always succeeds with `changed == false`.
    pub async fn update(&self, id: i32, changes: ReservationChanges) -> BookingResult<UpdatedReservation> {
        let result = self.update_inner(id, changes).await;

        match &result {
            Ok(UpdatedReservation {
                reservation: r,
                changed: true,
            }) => info!(reservation_id = id, room_id = r.room_id, stay = %r.stay, "Reservation updated"),
            Ok(_) => {}
            Err(reason) => {
                metrics::counter!("reservations_rejected_total", "reason" => reason.kind())
                    .increment(1);
                warn!(reservation_id = id, reason = %reason, "Reservation update rejected");
            }
        }

        result
    }

    async fn update_inner(&self, id: i32, changes: ReservationChanges) -> BookingResult<UpdatedReservation> {
        let current = self.get(id).await?;
        let mut prospective = changes.apply_to(&current)?;

        if prospective.room_id == current.room_id && prospective.stay == current.stay {
            debug!(reservation_id = id, "Update changes nothing");
            return Ok(UpdatedReservation {
                reservation: current,
                changed: false,
            });
        }

        let room = self.resolve_room(prospective.room_id).await?;
        let _guard = self.lock_room(room.id).await;

        self.checker
            .check(&room, &prospective.stay, Some(current.id))
            .await?
            .into_result()?;

        prospective.status = ReservationStatus::Modified;
        // A cancel that lands first leaves nothing to update.
        let reservation = self
            .repos
            .reservations()
            .save(prospective)
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => BookingRejection::ReservationNotFound(id),
                other => BookingRejection::StoreFailure(other.to_string()),
            })?;

        Ok(UpdatedReservation {
            reservation,
            changed: true,
        })
    }

    /// Delete a reservation permanently.
    ///
    /// Returns `false` when it does not exist or the store refuses.
    pub async fn cancel(&self, id: i32) -> bool {
        match self.repos.reservations().delete_by_id(id).await {
            Ok(()) => {
                metrics::counter!("reservations_cancelled_total").increment(1);
                info!(reservation_id = id, "Reservation cancelled");
                true
            }
            Err(e) => {
                warn!(reservation_id = id, error = %e, "Reservation cancellation failed");
                false
            }
        }
    }

    // ── Queries ────────────────────────────────────────────────

    pub async fn get(&self, id: i32) -> BookingResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(BookingRejection::ReservationNotFound(id))
    }

    /// All reservations, newest first
    pub async fn list(&self) -> BookingResult<Vec<Reservation>> {
        Ok(self.repos.reservations().find_all().await?)
    }

    pub async fn list_for_client(&self, client_id: i32) -> BookingResult<Vec<Reservation>> {
        let client = self.resolve_client(client_id).await?;
        Ok(self.repos.reservations().find_by_client(client.id).await?)
    }

    /// Enabled rooms free for the whole stay, optionally of one type
    pub async fn available_rooms(
        &self,
        arrival: NaiveDate,
        departure: NaiveDate,
        room_type: Option<&str>,
    ) -> BookingResult<Vec<Room>> {
        let stay = StayPeriod::new(arrival, departure)?;
        Ok(self.checker.available_rooms(&stay, room_type).await?)
    }

    /// Re-render the confirmation document of a stored reservation
    pub async fn fetch_document(&self, id: i32) -> BookingResult<RenderedDocument> {
        let reservation = self.get(id).await?;
        let client = self.resolve_client(reservation.client_id).await?;
        let room = self.resolve_room(reservation.room_id).await?;

        let bytes = self
            .documents
            .render(&BookingSnapshot {
                reservation,
                client,
                room,
            })
            .await
            .map_err(|e| BookingRejection::DocumentFailed(e.to_string()))?;

        Ok(RenderedDocument {
            content_type: self.documents.content_type(),
            bytes,
        })
    }

    // ── Helpers ────────────────────────────────────────────────

    async fn resolve_room(&self, room_id: i32) -> BookingResult<Room> {
        self.repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or(BookingRejection::RoomNotFound(room_id))
    }

    async fn resolve_client(&self, client_id: i32) -> BookingResult<Client> {
        self.repos
            .clients()
            .find_by_id(client_id)
            .await?
            .ok_or(BookingRejection::ClientNotFound(client_id))
    }

    async fn lock_room(&self, room_id: i32) -> Option<OwnedMutexGuard<()>> {
        if self.policy.serialize_room_bookings {
            Some(self.locks.acquire(room_id).await)
        } else {
            None
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
