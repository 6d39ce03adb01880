//! Reservation records and the shapes they pass through.
//!
//! A booking request arrives as a [`ReservationDraft`] (client wall-clock
//! fields, all strings), is checked into a [`ValidReservation`] (typed,
//! sanitized), canonicalized into a [`NewReservation`] (the full stored
//! field set including the Bulgarian slot), and finally persisted as a
//! [`Reservation`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::convert::{self, DATE_FMT, TIME_FMT};

/// A stored reservation.
///
/// `slot_date`/`slot_time` are the canonical `Europe/Sofia` wall-clock
/// pair and form the uniqueness key; `client_date`/`client_time` are the
/// requester's own view, kept for display and never consulted for
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub client: String,
    pub content: String,
    pub email: String,
    pub client_date: String,
    pub client_time: String,
    pub client_timezone: String,
    pub slot_date: String,
    pub slot_time: String,
    pub created_at: NaiveDateTime,
}

/// An inbound booking request, before validation.
///
/// `date` and `time` are wall-clock in `timezone`; the server derives
/// the Bulgarian slot itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationDraft {
    pub client: String,
    pub content: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
}

/// A draft that passed strict validation: fields sanitized, date/time
/// parsed, timezone resolved.
#[derive(Debug, Clone)]
pub struct ValidReservation {
    pub client: String,
    pub content: String,
    pub email: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub timezone: Tz,
    pub timezone_name: String,
}

impl ValidReservation {
    /// Canonicalizes the client wall-clock into the Bulgarian slot and
    /// produces the full stored field set.
    pub fn into_record(self) -> NewReservation {
        let (slot_date, slot_time) =
            convert::local_to_reference_naive(self.date, self.time, self.timezone);
        NewReservation {
            client: self.client,
            content: self.content,
            email: self.email,
            client_date: self.date.format(DATE_FMT).to_string(),
            client_time: self.time.format(TIME_FMT).to_string(),
            client_timezone: self.timezone_name,
            slot_date: slot_date.format(DATE_FMT).to_string(),
            slot_time: slot_time.format(TIME_FMT).to_string(),
        }
    }
}

/// The full field set written on insert and on (full-field) update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub client: String,
    pub content: String,
    pub email: String,
    pub client_date: String,
    pub client_time: String,
    pub client_timezone: String,
    pub slot_date: String,
    pub slot_time: String,
}
