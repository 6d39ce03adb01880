//! Strict request validation for the booking path.
//!
//! Everything here runs **before** any store access. The permissive
//! conversion layer (`time::convert`) is deliberately never relied on to
//! catch bad input; this module owns the strict semantics.

use chrono::{Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::booking::reservation::{ReservationDraft, ValidReservation};
use crate::error::booking::ValidationError;
use crate::time::clock::Clock;
use crate::time::convert;

/// Maximum length of the client display name, in characters after trim.
const MAX_CLIENT_LEN: usize = 100;

/// Maximum length of the topic/agenda text, in characters after trim.
const MAX_CONTENT_LEN: usize = 1000;

/// Validates a booking request, including the lead-time rule: the
/// requested wall-clock, anchored in its own timezone, must be at least
/// `min_lead` in the future of `clock`.
pub fn validate_booking(
    draft: &ReservationDraft,
    clock: &dyn Clock,
    min_lead: Duration,
) -> Result<ValidReservation, ValidationError> {
    let valid = validate_fields(draft)?;

    let requested = convert::resolve_in(valid.timezone, NaiveDateTime::new(valid.date, valid.time))
        .with_timezone(&Utc);
    if requested < clock.now_utc() + min_lead {
        return Err(ValidationError::TooSoon {
            min_lead_hours: min_lead.num_hours(),
        });
    }

    Ok(valid)
}

/// Validates a full-field update.
///
/// Same field rules as a new booking, but no lead-time check: moving or
/// correcting an existing reservation in the past is allowed.
pub fn validate_update(draft: &ReservationDraft) -> Result<ValidReservation, ValidationError> {
    validate_fields(draft)
}

fn validate_fields(draft: &ReservationDraft) -> Result<ValidReservation, ValidationError> {
    let client = sanitize(&draft.client, MAX_CLIENT_LEN);
    if client.is_empty() {
        return Err(ValidationError::MissingField("client"));
    }

    let content = sanitize(&draft.content, MAX_CONTENT_LEN);
    if content.is_empty() {
        return Err(ValidationError::MissingField("content"));
    }

    let email = draft.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    if draft.date.trim().is_empty() {
        return Err(ValidationError::MissingField("date"));
    }
    let date = convert::parse_date(&draft.date).ok_or(ValidationError::InvalidDate)?;

    if draft.time.trim().is_empty() {
        return Err(ValidationError::MissingField("time"));
    }
    let time = convert::parse_time(&draft.time).ok_or(ValidationError::InvalidTime)?;

    let timezone_name = draft.timezone.trim();
    if timezone_name.is_empty() {
        return Err(ValidationError::MissingField("timezone"));
    }
    let timezone: Tz = timezone_name
        .parse()
        .map_err(|_| ValidationError::UnknownTimezone(timezone_name.to_string()))?;

    Ok(ValidReservation {
        client,
        content,
        email,
        date,
        time,
        timezone,
        timezone_name: timezone_name.to_string(),
    })
}

/// Trims and caps a free-text field at `max` characters.
fn sanitize(s: &str, max: usize) -> String {
    s.trim().chars().take(max).collect()
}

/// Basic `local@domain` shape: no whitespace, exactly one `@`, and a dot
/// with text on both sides inside the domain.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    matches!(domain.rsplit_once('.'), Some((head, tail)) if !head.is_empty() && !tail.is_empty())
}
