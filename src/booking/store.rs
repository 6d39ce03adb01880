//! Port trait for reservation persistence.
//!
//! The booking logic is written against this trait only; the production
//! implementation is [`crate::booking::sql_store::SqlReservationStore`]
//! and tests substitute mocks or in-memory doubles.

use anyhow::Result;
use thiserror::Error;
use uuid::Uuid;

use crate::booking::reservation::{NewReservation, Reservation};

/// Failure modes of a store write.
///
/// [`WriteError::DuplicateSlot`] is the signal the availability logic
/// turns into a booking conflict; everything else is infrastructure
/// trouble.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("a reservation already occupies this slot")]
    DuplicateSlot,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Abstraction over the reservation collection.
///
/// ## Contract
///
/// - `insert` must fail with [`WriteError::DuplicateSlot`] when a record
///   with the same `(slot_date, slot_time)` already exists, even if a
///   prior existence check said the slot was free. This is what makes
///   concurrent double-booking attempts safe.
/// - `find_all` returns newest-first by creation time.
/// - `update` replaces every field of the record (no partial patch) and
///   reports `Ok(None)` for an unknown id.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore: Send + Sync {
    /// Looks up the reservation occupying an exact canonical slot.
    fn find_by_slot(&self, slot_date: &str, slot_time: &str) -> Result<Option<Reservation>>;

    /// Fetches all reservations whose `slot_date` lies in the inclusive
    /// range `[from_date, to_date]` (ISO dates compare lexicographically).
    fn find_in_slot_range(&self, from_date: &str, to_date: &str) -> Result<Vec<Reservation>>;

    /// Persists a new reservation, assigning id and creation time.
    fn insert(&self, record: NewReservation) -> Result<Reservation, WriteError>;

    /// All reservations, newest first.
    fn find_all(&self) -> Result<Vec<Reservation>>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>>;

    /// Full-field update; `Ok(None)` when the id does not exist.
    fn update(&self, id: Uuid, record: NewReservation) -> Result<Option<Reservation>, WriteError>;

    /// Removes a reservation, returning the deleted record if it existed.
    fn delete(&self, id: Uuid) -> Result<Option<Reservation>>;
}
