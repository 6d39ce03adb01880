use thiserror::Error;

/// A common error representing that a requested entity was not found.
///
/// Used by the reservation and note services when a lookup, update, or
/// delete targets an identifier with no live record. Absence is a normal
/// outcome at this layer, not a crash; callers map it to their own
/// "not found" response.
///
/// # Example
/// ```
/// use avoex_booking::error::entity::NotFoundError;
///
/// let err = NotFoundError::new("Reservation");
/// assert_eq!(err.to_string(), "Reservation not found");
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Name of the entity that was not found (e.g. `"Reservation"`, `"Note"`)
    pub entity: &'static str,
}

impl NotFoundError {
    /// Create a new `NotFoundError` for the specified entity.
    pub fn new(entity: &'static str) -> Self {
        Self { entity }
    }
}
