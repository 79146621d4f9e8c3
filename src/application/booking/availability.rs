//! Room availability checks
//!
//! A room can take a stay when it is enabled and no other reservation on it
//! intersects the stay. The disabled check runs first and short-circuits.

use std::sync::Arc;

use crate::domain::{DomainResult, RepositoryProvider, Reservation, Room, StayPeriod};

use super::rejection::BookingRejection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Allowed,
    Rejected(BookingRejection),
}

impl Availability {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn into_result(self) -> Result<(), BookingRejection> {
        match self {
            Self::Allowed => Ok(()),
            Self::Rejected(reason) => Err(reason),
        }
    }
}

/// First reservation in `existing` that blocks `stay` in `room_id`,
/// ignoring the reservation with id `exclude`.
pub fn find_conflict<'a>(
    existing: &'a [Reservation],
    room_id: i32,
    stay: &StayPeriod,
    exclude: Option<i32>,
) -> Option<&'a Reservation> {
    existing
        .iter()
        .filter(|r| Some(r.id) != exclude)
        .find(|r| r.conflicts_with(room_id, stay))
}

/// Read-only validation against the persisted reservations of a room
#[derive(Clone)]
pub struct AvailabilityChecker {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityChecker {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Check whether `room` can take `stay`.
    ///
    /// `exclude` names a reservation that must not count as a conflict,
    /// i.e. the one being updated.
    pub async fn check(
        &self,
        room: &Room,
        stay: &StayPeriod,
        exclude: Option<i32>,
    ) -> DomainResult<Availability> {
        if !room.enabled {
            return Ok(Availability::Rejected(BookingRejection::RoomDisabled(room.id)));
        }

        let booked = self.repos.reservations().find_by_room(room.id).await?;

        Ok(match find_conflict(&booked, room.id, stay, exclude) {
            Some(conflict) => Availability::Rejected(BookingRejection::Overlap {
                room_id: room.id,
                conflicting_reservation: conflict.id,
            }),
            None => Availability::Allowed,
        })
    }

    /// Enabled rooms, optionally of one type, that are free for `stay`
    pub async fn available_rooms(
        &self,
        stay: &StayPeriod,
        room_type: Option<&str>,
    ) -> DomainResult<Vec<Room>> {
        let rooms = self.repos.rooms().find_all().await?;
        let booked = self.repos.reservations().find_all().await?;

        Ok(rooms
            .into_iter()
            .filter(|room| room.enabled)
            .filter(|room| room_type.map_or(true, |t| room.is_of_type(t)))
            .filter(|room| find_conflict(&booked, room.id, stay, None).is_none())
            .collect())
    }
}
