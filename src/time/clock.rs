use chrono::{DateTime, Utc};

/// A port that provides the **current instant** for the application.
///
/// # Purpose
/// This trait abstracts access to "now" so that:
///
/// - The booking lead-time rule does **not** read system time directly
/// - Implementations can be swapped (system clock, fixed clock, mock)
/// - Tests can pin time and stay deterministic
///
/// # Design Notes
/// - The clock deals in absolute instants (`DateTime<Utc>`); rendering an
///   instant in a particular timezone is the job of `time::convert`.
/// - This trait represents an **external capability**, like a repository
///   or a mailer.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc>;
}
