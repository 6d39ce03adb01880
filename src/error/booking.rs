//! Error taxonomy of the booking operations.
//!
//! The split matters to callers: a [`ValidationError`] is rejected before
//! any store access, [`BookingError::SlotTaken`] is surfaced distinctly so
//! the caller can offer "pick another time", a missing identifier is an
//! absence rather than a failure, and only genuine persistence trouble
//! becomes [`BookingError::Store`].

use thiserror::Error;

use crate::error::entity::NotFoundError;

/// Rejection of a request before it touches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid date format, expected YYYY-MM-DD")]
    InvalidDate,

    #[error("invalid time format, expected HH:MM")]
    InvalidTime,

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The requested slot is in the past or inside the minimum lead-time
    /// window measured from the current instant.
    #[error("the requested time must be at least {min_lead_hours} hours from now")]
    TooSoon { min_lead_hours: i64 },
}

/// Failure modes of the reservation operations.
///
/// A slot collision maps to [`BookingError::SlotTaken`] regardless of
/// whether the pre-write check or the storage unique index detected it,
/// so callers see uniform behavior under races.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("this time slot is already booked, please choose a different time")]
    SlotTaken,

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("storage failure")]
    Store(#[source] anyhow::Error),
}
