//! # Environment Variable Utilities
//!
//! Helpers for reading environment variables with common type
//! conversions, used by the configuration loaders (`AppConfig`,
//! `BookingConfig`).

/// Reads a boolean flag from an environment variable.
///
/// Returns `true` for any of the following case-insensitive values:
/// `"1"`, `"true"`, `"yes"`, `"on"`.
pub fn read_flag(name: &str, default: bool) -> bool {
    read_flag_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads a boolean flag using a custom provider function.
///
/// Useful for testing without touching the process environment.
///
/// # Example
/// ```
/// use avoex_booking::config::env::read_flag_from;
///
/// let val = read_flag_from(|_| Some("true".into()), "MAIL_ENABLED", false);
/// assert!(val);
/// ```
pub fn read_flag_from<F>(provider: F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => {
            let s = v.trim().trim_matches(|c| c == '"' || c == '\'');
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        }
        None => default,
    }
}

/// Reads an unsigned integer (`u32`) from an environment variable,
/// returning the provided default if parsing fails.
///
/// # Example
/// ```rust,no_run
/// use avoex_booking::config::env::read_u32;
///
/// let lead = read_u32("BOOKING_MIN_LEAD_HOURS", 2);
/// ```
pub fn read_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}
