use chrono::Duration;

use crate::config::env::read_u32;

/// Policy knobs of the booking rules.
///
/// Reads from environment variables:
/// - `BOOKING_MIN_LEAD_HOURS` - minimum distance between "now" and a
///   requested slot, in hours (default `2`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingConfig {
    /// Requests resolving to an instant closer than this many hours from
    /// now are rejected as too soon.
    pub min_lead_hours: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { min_lead_hours: 2 }
    }
}

impl BookingConfig {
    /// Builds a [`BookingConfig`] from environment variables, falling
    /// back to defaults on missing or unparsable values.
    pub fn from_env() -> Self {
        Self {
            min_lead_hours: read_u32("BOOKING_MIN_LEAD_HOURS", 2),
        }
    }

    /// The minimum lead window as a [`Duration`].
    pub fn min_lead(&self) -> Duration {
        Duration::hours(i64::from(self.min_lead_hours))
    }
}
