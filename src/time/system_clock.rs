use chrono::{DateTime, Utc};

use crate::time::clock::Clock;

/// A [`Clock`] implementation backed by the operating system clock.
///
/// # Responsibility
/// - Selecting the clock is the responsibility of the **composition
///   root** (the host server's `main`).
/// - Application logic treats [`Clock`] as a trusted source and never
///   calls `Utc::now()` itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
