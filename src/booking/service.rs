//! Application service for reservations.
//!
//! This is the surface the (external) HTTP layer calls. Each operation
//! validates strictly at the boundary, delegates slot semantics to
//! [`AvailabilityGuard`], and keeps the confirmation email strictly
//! fire-and-forget: the booking result never depends on the send.

use std::sync::Arc;

use chrono::Duration;
use chrono_tz::Tz;
use tracing::{info, warn};
use uuid::Uuid;

use crate::booking::availability::AvailabilityGuard;
use crate::booking::reservation::{Reservation, ReservationDraft};
use crate::booking::store::{ReservationStore, WriteError};
use crate::booking::validate::{validate_booking, validate_update};
use crate::config::booking::BookingConfig;
use crate::error::booking::{BookingError, ValidationError};
use crate::error::entity::NotFoundError;
use crate::notification::confirmation::{confirmation_email, BookingNotice};
use crate::notification::email_sender::EmailSender;
use crate::time::clock::Clock;
use crate::time::convert;

/// Reservation operations exposed to the HTTP layer.
pub struct ReservationService {
    guard: AvailabilityGuard,
    store: Arc<dyn ReservationStore>,
    clock: Arc<dyn Clock>,
    mailer: Option<Arc<dyn EmailSender>>,
    min_lead: Duration,
}

impl ReservationService {
    /// Wires the service from its collaborators. `mailer: None` disables
    /// confirmation emails (bookings still succeed).
    pub fn new(
        store: Arc<dyn ReservationStore>,
        clock: Arc<dyn Clock>,
        mailer: Option<Arc<dyn EmailSender>>,
        config: &BookingConfig,
    ) -> Self {
        Self {
            guard: AvailabilityGuard::new(Arc::clone(&store)),
            store,
            clock,
            mailer,
            min_lead: config.min_lead(),
        }
    }

    /// Books a reservation: validate, canonicalize to Bulgarian time,
    /// reject if the slot is taken, persist, then hand the confirmation
    /// to the mail collaborator without waiting for it.
    ///
    /// Must be called within a tokio runtime when a mailer is
    /// configured; the send runs as a detached task.
    pub fn create_reservation(&self, draft: ReservationDraft) -> Result<Reservation, BookingError> {
        let valid = validate_booking(&draft, self.clock.as_ref(), self.min_lead)?;
        let reservation = self.guard.book_if_free(valid)?;

        info!(
            id = %reservation.id,
            slot_date = %reservation.slot_date,
            slot_time = %reservation.slot_time,
            "reservation created"
        );
        self.send_confirmation(&reservation);

        Ok(reservation)
    }

    /// The booked times of day on `date`.
    ///
    /// Without `timezone`, `date` is a Bulgarian calendar date and the
    /// returned times are Bulgarian. With `timezone`, both the date and
    /// the returned times are client-local. No ordering is guaranteed.
    pub fn booked_slots(
        &self,
        date: &str,
        timezone: Option<&str>,
    ) -> Result<Vec<String>, BookingError> {
        let date = convert::parse_date(date).ok_or(ValidationError::InvalidDate)?;
        let tz = timezone
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| ValidationError::UnknownTimezone(name.to_string()))
            })
            .transpose()?;

        self.guard.list_booked_slots(date, tz)
    }

    /// All reservations, newest first.
    pub fn get_all(&self) -> Result<Vec<Reservation>, BookingError> {
        self.store.find_all().map_err(BookingError::Store)
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Reservation, BookingError> {
        self.store
            .find_by_id(id)
            .map_err(BookingError::Store)?
            .ok_or_else(|| NotFoundError::new("Reservation").into())
    }

    /// Full-field update. Every field is replaced and the slot is
    /// re-canonicalized from the submitted client wall-clock.
    ///
    /// Slot uniqueness is **not** re-checked against other records here;
    /// only the storage unique index stands in the way of an update that
    /// collides, surfaced as [`BookingError::SlotTaken`].
    pub fn update(&self, id: Uuid, draft: ReservationDraft) -> Result<Reservation, BookingError> {
        let record = validate_update(&draft)?.into_record();

        match self.store.update(id, record) {
            Ok(Some(updated)) => Ok(updated),
            Ok(None) => Err(NotFoundError::new("Reservation").into()),
            Err(WriteError::DuplicateSlot) => Err(BookingError::SlotTaken),
            Err(WriteError::Store(e)) => Err(BookingError::Store(e)),
        }
    }

    /// Deletes a reservation, returning the removed record.
    pub fn delete(&self, id: Uuid) -> Result<Reservation, BookingError> {
        self.store
            .delete(id)
            .map_err(BookingError::Store)?
            .ok_or_else(|| NotFoundError::new("Reservation").into())
    }

    /// Hands the confirmation email off as a detached task. Failures are
    /// logged and discarded; they never affect the booking result.
    fn send_confirmation(&self, reservation: &Reservation) {
        let Some(mailer) = &self.mailer else {
            info!("mail sender not configured, skipping confirmation email");
            return;
        };

        let notice = BookingNotice::from(reservation);
        let email = match confirmation_email(&notice) {
            Ok(email) => email,
            Err(err) => {
                warn!("could not build confirmation email: {err:#}");
                return;
            }
        };

        let mailer = Arc::clone(mailer);
        let recipient = notice.email;
        tokio::spawn(async move {
            match mailer.send(email).await {
                Ok(()) => info!(%recipient, "confirmation email sent"),
                Err(err) => warn!(%recipient, "confirmation email failed: {err:#}"),
            }
        });
    }
}
