//! Builds the booking confirmation email.
//!
//! The reservation is stored in Bulgarian time, but the client is shown
//! their **own** wall-clock: the stored slot is converted back through
//! `time::convert` before rendering. Clients in US-style timezones get a
//! 12-hour clock, everyone else 24-hour.

use anyhow::{Context, Result};
use askama::Template;
use chrono::{NaiveDate, NaiveTime};
use lettre::message::Mailbox;

use crate::booking::reservation::Reservation;
use crate::notification::email::{Email, EmailBody};
use crate::time::convert::{self, DATE_FMT, TIME_FMT};

const SUBJECT: &str = "Booking Confirmation - Avoex";

/// The plain data record handed to the notification path after a
/// successful booking. The booking result never depends on what happens
/// to it.
#[derive(Debug, Clone)]
pub struct BookingNotice {
    pub client: String,
    pub email: String,
    pub content: String,
    pub slot_date: String,
    pub slot_time: String,
    pub client_timezone: String,
}

impl From<&Reservation> for BookingNotice {
    fn from(r: &Reservation) -> Self {
        Self {
            client: r.client.clone(),
            email: r.email.clone(),
            content: r.content.clone(),
            slot_date: r.slot_date.clone(),
            slot_time: r.slot_time.clone(),
            client_timezone: r.client_timezone.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "booking_confirmation.html")]
struct ConfirmationHtml<'a> {
    client: &'a str,
    content: &'a str,
    meeting_date: &'a str,
    meeting_time: &'a str,
}

#[derive(Template)]
#[template(path = "booking_confirmation.txt")]
struct ConfirmationText<'a> {
    client: &'a str,
    content: &'a str,
    meeting_date: &'a str,
    meeting_time: &'a str,
}

/// Renders the confirmation [`Email`] for a booked reservation.
///
/// # Errors
/// Fails when the stored recipient address does not parse as a mailbox
/// or a template fails to render; the caller logs and drops either case.
pub fn confirmation_email(notice: &BookingNotice) -> Result<Email> {
    let (date, time) = client_local_slot(notice);

    let meeting_date = display_date(&date);
    let meeting_time = display_time(&time, &notice.client_timezone);

    let html = ConfirmationHtml {
        client: &notice.client,
        content: &notice.content,
        meeting_date: &meeting_date,
        meeting_time: &meeting_time,
    }
    .render()
    .context("render confirmation html")?;

    let text = ConfirmationText {
        client: &notice.client,
        content: &notice.content,
        meeting_date: &meeting_date,
        meeting_time: &meeting_time,
    }
    .render()
    .context("render confirmation text")?;

    let to: Mailbox = notice
        .email
        .parse()
        .context("invalid recipient address")?;

    Ok(Email {
        subject: SUBJECT.to_string(),
        to,
        body: EmailBody::TextAndHtml { text, html },
    })
}

/// The stored Bulgarian slot re-expressed in the client's timezone.
/// Falls back to the stored values if the timezone no longer resolves.
fn client_local_slot(notice: &BookingNotice) -> (String, String) {
    let (date, time) = convert::reference_to_local(
        &notice.slot_date,
        &notice.slot_time,
        &notice.client_timezone,
    );
    if date.is_empty() {
        (notice.slot_date.clone(), notice.slot_time.clone())
    } else {
        (date, time)
    }
}

fn display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, DATE_FMT) {
        Ok(d) => d.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

fn display_time(time: &str, timezone: &str) -> String {
    match NaiveTime::parse_from_str(time, TIME_FMT) {
        Ok(t) if uses_12_hour_clock(timezone) => t.format("%-I:%M %p").to_string(),
        Ok(t) => t.format("%H:%M").to_string(),
        Err(_) => time.to_string(),
    }
}

/// Clients from US-style timezones expect AM/PM display.
fn uses_12_hour_clock(timezone: &str) -> bool {
    ["America/", "US/", "Pacific/"]
        .iter()
        .any(|prefix| timezone.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(zone: &str) -> BookingNotice {
        BookingNotice {
            client: "Maria Petrova".into(),
            email: "maria@example.com".into(),
            content: "Portfolio review".into(),
            slot_date: "2025-06-10".into(),
            slot_time: "17:00".into(),
            client_timezone: zone.into(),
        }
    }

    fn html_of(email: &Email) -> &str {
        match &email.body {
            EmailBody::TextAndHtml { html, .. } => html,
            _ => panic!("expected TextAndHtml"),
        }
    }

    #[test]
    fn email_shows_the_slot_in_client_local_time_with_am_pm() {
        // Sofia 17:00 is 10:00 in New York in June.
        let email = confirmation_email(&notice("America/New_York")).unwrap();

        let html = html_of(&email);
        assert!(html.contains("Hello, Maria Petrova!"));
        assert!(html.contains("Tuesday, June 10, 2025"));
        assert!(html.contains("10:00 AM"));
        assert!(html.contains("Portfolio review"));
    }

    #[test]
    fn non_us_clients_get_a_24_hour_clock() {
        // Sofia 17:00 is 23:00 in Tokyo.
        let email = confirmation_email(&notice("Asia/Tokyo")).unwrap();

        let html = html_of(&email);
        assert!(html.contains("23:00"));
        assert!(!html.contains("PM"));
    }

    #[test]
    fn plain_text_alternative_carries_the_same_details() {
        let email = confirmation_email(&notice("America/New_York")).unwrap();

        let EmailBody::TextAndHtml { text, .. } = &email.body else {
            panic!("expected TextAndHtml");
        };
        assert!(text.contains("Maria Petrova"));
        assert!(text.contains("Tuesday, June 10, 2025"));
        assert!(text.contains("10:00 AM"));
    }

    #[test]
    fn unresolvable_stored_timezone_falls_back_to_bulgarian_time() {
        // e.g. the IANA name was renamed between write and read
        let email = confirmation_email(&notice("Not/AZone")).unwrap();

        let html = html_of(&email);
        assert!(html.contains("Tuesday, June 10, 2025"));
        assert!(html.contains("17:00"));
    }

    #[test]
    fn html_escapes_client_supplied_text() {
        let mut n = notice("UTC");
        n.client = "<script>alert(1)</script>".into();

        let email = confirmation_email(&n).unwrap();
        let html = html_of(&email);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn subject_and_recipient_are_set() {
        let email = confirmation_email(&notice("UTC")).unwrap();

        assert_eq!(email.subject, "Booking Confirmation - Avoex");
        assert_eq!(email.to.email.to_string(), "maria@example.com");
    }

    #[test]
    fn bad_recipient_address_is_an_error() {
        let mut n = notice("UTC");
        n.email = "not-an-email".into();

        assert!(confirmation_email(&n).is_err());
    }
}
