//! Wall-clock conversion between client timezones and Bulgarian time.
//!
//! Every reservation is stored canonically as a `(date, time)` pair in the
//! fixed reference timezone `Europe/Sofia`. Clients submit and read back
//! wall-clock values in their own IANA timezone, so this module converts
//! in both directions:
//!
//! - [`local_to_reference`]: client wall-clock -> Bulgarian wall-clock
//! - [`reference_to_local`]: Bulgarian wall-clock -> client wall-clock
//! - [`validate`]: checks an IANA timezone identifier
//!
//! The UTC offset of a timezone is resolved **at the specific calendar
//! date** being converted, never from a fixed constant, so conversions
//! stay correct across daylight-saving transitions in either zone.
//!
//! # Two layers
//!
//! The string-level functions are total and permissive: malformed input
//! yields empty strings instead of an error, because they also back
//! best-effort display paths (email rendering, slot listings). The
//! validated booking path performs its own strict field validation first
//! (`booking::validate`) and then uses the typed `_naive` variants, which
//! cannot fail for a parsed date, time, and timezone.
//!
//! # Daylight-saving edges
//!
//! A wall-clock value that is ambiguous in its timezone (the repeated
//! hour when clocks fall back) resolves to the **earlier** instant. A
//! value that does not exist (the skipped hour when clocks spring
//! forward) is shifted **forward** past the gap. These are the only
//! inputs for which the round-trip `reference_to_local(local_to_reference(d, t, z), z)`
//! may not reproduce `(d, t)` exactly.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The fixed reference timezone all reservations are stored in.
pub const REFERENCE_TZ: Tz = chrono_tz::Europe::Sofia;

/// Canonical date format for stored and wire-level dates.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Canonical 24-hour time format for stored and wire-level times.
pub const TIME_FMT: &str = "%H:%M";

/// Returns `true` iff `tz_name` is an IANA identifier the bundled
/// timezone database can resolve. Never panics.
pub fn validate(tz_name: &str) -> bool {
    tz_name.parse::<Tz>().is_ok()
}

/// Anchors a naive wall-clock value in `tz`, producing the absolute
/// instant it denotes.
///
/// Total by construction: ambiguous wall-clocks take the earlier
/// instant, nonexistent wall-clocks are shifted forward past the
/// daylight-saving gap.
pub fn resolve_in(tz: Tz, wall: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _later) => earlier,
        LocalResult::None => {
            // Inside a spring-forward gap. Gaps are one hour in every
            // zone this system serves, so probing one hour later lands
            // on a representable wall-clock again.
            tz.from_local_datetime(&(wall + Duration::hours(1)))
                .earliest()
                .unwrap_or_else(|| Utc.from_utc_datetime(&wall).with_timezone(&tz))
        }
    }
}

/// Typed core of [`local_to_reference`].
///
/// Interprets `(date, time)` as wall-clock in `tz` and re-renders the
/// same instant as wall-clock in [`REFERENCE_TZ`].
pub fn local_to_reference_naive(date: NaiveDate, time: NaiveTime, tz: Tz) -> (NaiveDate, NaiveTime) {
    let instant = resolve_in(tz, NaiveDateTime::new(date, time));
    let reference = instant.with_timezone(&REFERENCE_TZ);
    (reference.date_naive(), reference.time())
}

/// Typed core of [`reference_to_local`].
///
/// Interprets `(date, time)` as wall-clock in [`REFERENCE_TZ`] and
/// re-renders the same instant as wall-clock in `tz`.
pub fn reference_to_local_naive(date: NaiveDate, time: NaiveTime, tz: Tz) -> (NaiveDate, NaiveTime) {
    let instant = resolve_in(REFERENCE_TZ, NaiveDateTime::new(date, time));
    let local = instant.with_timezone(&tz);
    (local.date_naive(), local.time())
}

/// Converts a client wall-clock pair into the Bulgarian wall-clock pair.
///
/// `date` must be `YYYY-MM-DD`, `time` must be 24-hour `HH:MM`, and
/// `tz_name` an IANA identifier. On any malformed or missing input the
/// result is a pair of empty strings rather than an error.
pub fn local_to_reference(date: &str, time: &str, tz_name: &str) -> (String, String) {
    let Some((d, t, tz)) = parse_wall_clock(date, time, tz_name) else {
        return (String::new(), String::new());
    };
    let (ref_date, ref_time) = local_to_reference_naive(d, t, tz);
    format_wall_clock(ref_date, ref_time)
}

/// Converts a Bulgarian wall-clock pair into the client's wall-clock pair.
///
/// Same formats and permissive degradation as [`local_to_reference`].
pub fn reference_to_local(date: &str, time: &str, tz_name: &str) -> (String, String) {
    let Some((d, t, tz)) = parse_wall_clock(date, time, tz_name) else {
        return (String::new(), String::new());
    };
    let (local_date, local_time) = reference_to_local_naive(d, t, tz);
    format_wall_clock(local_date, local_time)
}

/// Strict `YYYY-MM-DD` parse. Rejects unpadded or otherwise misshapen
/// dates that `chrono` alone would accept.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FMT).ok()
}

/// Strict 24-hour `HH:MM` parse.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let b = s.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(s, TIME_FMT).ok()
}

fn parse_wall_clock(date: &str, time: &str, tz_name: &str) -> Option<(NaiveDate, NaiveTime, Tz)> {
    let d = parse_date(date)?;
    let t = parse_time(time)?;
    let tz = tz_name.parse::<Tz>().ok()?;
    Some((d, t, tz))
}

fn format_wall_clock(date: NaiveDate, time: NaiveTime) -> (String, String) {
    (
        date.format(DATE_FMT).to_string(),
        time.format(TIME_FMT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_recognizes_real_timezones() {
        assert!(validate("Europe/Sofia"));
        assert!(validate("America/New_York"));
        assert!(validate("UTC"));
    }

    #[test]
    fn validate_rejects_unknown_and_empty() {
        assert!(!validate("Not/AZone"));
        assert!(!validate(""));
    }

    #[test]
    fn new_york_summer_afternoon_maps_to_sofia_evening() {
        // June: New York is UTC-4, Sofia UTC+3.
        let (d, t) = local_to_reference("2025-06-10", "10:00", "America/New_York");
        assert_eq!((d.as_str(), t.as_str()), ("2025-06-10", "17:00"));
    }

    #[test]
    fn late_local_evening_crosses_into_next_sofia_day() {
        let (d, t) = local_to_reference("2025-06-10", "23:00", "America/New_York");
        assert_eq!((d.as_str(), t.as_str()), ("2025-06-11", "06:00"));
    }

    #[test]
    fn reference_to_local_inverts_the_mapping() {
        let (d, t) = reference_to_local("2025-06-11", "06:00", "America/New_York");
        assert_eq!((d.as_str(), t.as_str()), ("2025-06-10", "23:00"));
    }

    #[test]
    fn offset_is_resolved_per_date_not_per_zone() {
        // Sydney observes DST opposite to Sofia: +7h apart in June,
        // +9h apart in January. A fixed offset would fail one of these.
        let (_, t_june) = local_to_reference("2025-06-10", "12:00", "Australia/Sydney");
        assert_eq!(t_june, "05:00");

        let (_, t_jan) = local_to_reference("2025-01-10", "12:00", "Australia/Sydney");
        assert_eq!(t_jan, "03:00");
    }

    #[test]
    fn round_trip_reproduces_input_off_dst_edges() {
        let samples = [
            ("2025-06-10", "09:30", "America/New_York"),
            ("2025-12-24", "18:15", "Asia/Tokyo"),
            ("2025-03-01", "00:00", "UTC"),
            ("2025-07-04", "23:45", "Australia/Sydney"),
            ("2025-02-14", "08:00", "Europe/Sofia"),
        ];
        for (date, time, zone) in samples {
            let (ref_date, ref_time) = local_to_reference(date, time, zone);
            let (back_date, back_time) = reference_to_local(&ref_date, &ref_time, zone);
            assert_eq!((back_date.as_str(), back_time.as_str()), (date, time), "zone {zone}");
        }
    }

    #[test]
    fn nonexistent_sofia_wall_clock_shifts_forward() {
        // Sofia springs forward 2025-03-30: 03:00 EET jumps to 04:00 EEST,
        // so 03:30 never occurs on that local clock.
        let (d, t) = reference_to_local("2025-03-30", "03:30", "UTC");
        assert_eq!((d.as_str(), t.as_str()), ("2025-03-30", "01:30"));
    }

    #[test]
    fn ambiguous_sofia_wall_clock_takes_earlier_instant() {
        // Sofia falls back 2025-10-26: 04:00 EEST becomes 03:00 EET, so
        // 03:30 occurs twice. The earlier (still-EEST, UTC+3) one wins.
        let (d, t) = reference_to_local("2025-10-26", "03:30", "UTC");
        assert_eq!((d.as_str(), t.as_str()), ("2025-10-26", "00:30"));
    }

    #[test]
    fn malformed_input_degrades_to_empty_fields() {
        assert_eq!(local_to_reference("", "10:00", "UTC"), (String::new(), String::new()));
        assert_eq!(local_to_reference("2025-06-10", "", "UTC"), (String::new(), String::new()));
        assert_eq!(local_to_reference("2025-06-10", "10:00", "Not/AZone"), (String::new(), String::new()));
        assert_eq!(local_to_reference("10-06-2025", "10:00", "UTC"), (String::new(), String::new()));
        assert_eq!(reference_to_local("2025-06-10", "25:99", "UTC"), (String::new(), String::new()));
    }

    #[test]
    fn parse_date_requires_padded_iso_shape() {
        assert!(parse_date("2025-06-10").is_some());
        assert!(parse_date("2025-6-10").is_none());
        assert!(parse_date("2025-06-10T00:00").is_none());
        assert!(parse_date("2025-13-01").is_none());
    }

    #[test]
    fn parse_time_requires_padded_24h_shape() {
        assert!(parse_time("09:30").is_some());
        assert!(parse_time("23:59").is_some());
        assert!(parse_time("9:30").is_none());
        assert!(parse_time("24:00").is_none());
    }
}
