//! Slot availability and the double-booking guard.
//!
//! This is the component that protects the one real invariant of the
//! system: no two live reservations share a canonical `(slot_date,
//! slot_time)` pair. It canonicalizes incoming bookings into Bulgarian
//! time, checks occupancy before writing, and treats a storage-level
//! duplicate-key failure as the same conflict: whichever side detects
//! the collision, the caller sees one uniform result.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tracing::warn;

use crate::booking::reservation::{Reservation, ValidReservation};
use crate::booking::store::{ReservationStore, WriteError};
use crate::error::booking::BookingError;
use crate::time::convert::{self, DATE_FMT, TIME_FMT};

/// Guards the slot-uniqueness invariant over a reservation store.
pub struct AvailabilityGuard {
    store: Arc<dyn ReservationStore>,
}

impl AvailabilityGuard {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    /// Canonicalizes a client wall-clock into the Bulgarian slot that
    /// would be persisted and uniqueness-checked for it.
    pub fn resolve_booking_slot(date: NaiveDate, time: NaiveTime, tz: Tz) -> (String, String) {
        let (slot_date, slot_time) = convert::local_to_reference_naive(date, time, tz);
        (
            slot_date.format(DATE_FMT).to_string(),
            slot_time.format(TIME_FMT).to_string(),
        )
    }

    /// Whether a reservation already occupies the exact canonical slot.
    pub fn is_slot_taken(&self, slot_date: &str, slot_time: &str) -> Result<bool, BookingError> {
        let existing = self
            .store
            .find_by_slot(slot_date, slot_time)
            .map_err(BookingError::Store)?;
        Ok(existing.is_some())
    }

    /// Books the slot if it is free.
    ///
    /// The pre-check and the insert are not atomic; a concurrent writer
    /// may pass the pre-check too. The store's unique index then rejects
    /// the loser with a duplicate-key failure, which is folded into the
    /// same [`BookingError::SlotTaken`] the pre-check produces.
    pub fn book_if_free(&self, booking: ValidReservation) -> Result<Reservation, BookingError> {
        let record = booking.into_record();

        if self.is_slot_taken(&record.slot_date, &record.slot_time)? {
            return Err(BookingError::SlotTaken);
        }

        match self.store.insert(record) {
            Ok(reservation) => Ok(reservation),
            Err(WriteError::DuplicateSlot) => Err(BookingError::SlotTaken),
            Err(WriteError::Store(e)) => Err(BookingError::Store(e)),
        }
    }

    /// Lists the booked times of day on `date`.
    ///
    /// Without a timezone, `date` is a Bulgarian calendar date and the
    /// result contains the stored slot times for exactly that date.
    ///
    /// With a timezone, `date` is a calendar date **in that timezone**.
    /// A client-local day can straddle two Bulgarian dates, so the query
    /// is widened by a day on each side and every candidate is converted
    /// back into client wall-clock; only those landing on the requested
    /// local date are kept. The order of results is unspecified.
    pub fn list_booked_slots(
        &self,
        date: NaiveDate,
        timezone: Option<Tz>,
    ) -> Result<Vec<String>, BookingError> {
        let day = date.format(DATE_FMT).to_string();

        let Some(tz) = timezone else {
            let rows = self
                .store
                .find_in_slot_range(&day, &day)
                .map_err(BookingError::Store)?;
            return Ok(rows.into_iter().map(|r| r.slot_time).collect());
        };

        let from = (date - Duration::days(1)).format(DATE_FMT).to_string();
        let to = (date + Duration::days(1)).format(DATE_FMT).to_string();
        let rows = self
            .store
            .find_in_slot_range(&from, &to)
            .map_err(BookingError::Store)?;

        let mut slots = Vec::new();
        for r in rows {
            let (Some(slot_date), Some(slot_time)) =
                (convert::parse_date(&r.slot_date), convert::parse_time(&r.slot_time))
            else {
                warn!(id = %r.id, "skipping reservation with malformed stored slot");
                continue;
            };
            let (local_date, local_time) =
                convert::reference_to_local_naive(slot_date, slot_time, tz);
            if local_date == date {
                slots.push(local_time.format(TIME_FMT).to_string());
            }
        }
        Ok(slots)
    }
}
