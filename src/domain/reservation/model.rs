//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A half-open `[arrival, departure)` interval of nights.
///
/// Arrival strictly precedes departure; the constructor rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayPeriod {
    arrival: NaiveDate,
    departure: NaiveDate,
}

impl StayPeriod {
    pub fn new(arrival: NaiveDate, departure: NaiveDate) -> Result<Self, DomainError> {
        if arrival >= departure {
            return Err(DomainError::Validation(format!(
                "arrival {} must be before departure {}",
                arrival, departure
            )));
        }
        Ok(Self { arrival, departure })
    }

    pub fn arrival(&self) -> NaiveDate {
        self.arrival
    }

    pub fn departure(&self) -> NaiveDate {
        self.departure
    }

    /// Number of nights covered by the stay (always >= 1)
    pub fn nights(&self) -> i64 {
        (self.departure - self.arrival).num_days()
    }

    /// Half-open intersection: a departure on another stay's arrival day
    /// does not conflict.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.arrival < other.departure && other.arrival < self.departure
    }
}

impl std::fmt::Display for StayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.arrival, self.departure)
    }
}

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Created through a booking request
    Confirmed,
    /// Dates or room changed after creation
    Modified,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Modified => "Modified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Modified" => Self::Modified,
            _ => Self::Confirmed,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room reservation
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Unique reservation ID (0 until the store assigns one)
    pub id: i32,
    /// Owning client
    pub client_id: i32,
    /// Booked room
    pub room_id: i32,
    pub stay: StayPeriod,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Build a not-yet-persisted reservation
    pub fn new(client_id: i32, room_id: i32, stay: StayPeriod) -> Self {
        Self {
            id: 0,
            client_id,
            room_id,
            stay,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    /// Whether this reservation blocks `stay` in `room_id`
    pub fn conflicts_with(&self, room_id: i32, stay: &StayPeriod) -> bool {
        self.room_id == room_id && self.stay.overlaps(stay)
    }
}

/// Partial update of a reservation; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationChanges {
    pub arrival: Option<NaiveDate>,
    pub departure: Option<NaiveDate>,
    pub room_id: Option<i32>,
}

impl ReservationChanges {
    /// Apply the changes onto a copy of `current`.
    ///
    /// Fails when the resulting dates do not form a valid stay.
    pub fn apply_to(&self, current: &Reservation) -> Result<Reservation, DomainError> {
        let stay = StayPeriod::new(
            self.arrival.unwrap_or(current.stay.arrival()),
            self.departure.unwrap_or(current.stay.departure()),
        )?;

        Ok(Reservation {
            room_id: self.room_id.unwrap_or(current.room_id),
            stay,
            ..current.clone()
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
