use std::env;

use anyhow::{Context, Result};

/// Configuration for the SMTP confirmation-mail sender.
///
/// Loaded from environment variables.
///
/// Required:
/// - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`,
///   `SMTP_FROM_EMAIL`
///
/// Optional:
/// - `SMTP_FROM_NAME` (default: `"Avoex Booking"`)
///
/// When the required variables are absent the application runs with the
/// mail sender disabled: bookings still succeed, confirmations are
/// skipped with a log line (see `config::app::AppConfig`).
#[derive(Clone, Debug)]
pub struct MailConfig {
    /// SMTP server host name or IP address
    pub host: String,
    /// SMTP server port number (usually 587, STARTTLS)
    pub port: u16,
    /// Username for SMTP authentication
    pub username: String,
    /// Password for SMTP authentication
    pub password: String,
    /// Sender email address
    pub from_email: String,
    /// Sender display name (defaults to `"Avoex Booking"`)
    pub from_name: String,
}

impl MailConfig {
    /// Creates a `MailConfig` from environment variables.
    ///
    /// # Errors
    /// - When a required environment variable is missing
    /// - When `SMTP_PORT` cannot be parsed as a number
    pub fn from_env() -> Result<Self> {
        let host = env::var("SMTP_HOST").context("SMTP_HOST not set")?;
        let port: u16 = env::var("SMTP_PORT")
            .context("SMTP_PORT not set")?
            .parse()
            .context("SMTP_PORT parse error")?;
        let username = env::var("SMTP_USERNAME").context("SMTP_USERNAME not set")?;
        let password = env::var("SMTP_PASSWORD").context("SMTP_PASSWORD not set")?;
        let from_email = env::var("SMTP_FROM_EMAIL").context("SMTP_FROM_EMAIL not set")?;

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Avoex Booking".into());

        Ok(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name,
        })
    }
}
