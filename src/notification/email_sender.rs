use anyhow::Result;
use async_trait::async_trait;

use super::email::Email;

/// Port trait for sending email messages.
///
/// Implementations may deliver via SMTP, write to a file for
/// development, or hand off to an external service. The booking service
/// treats every implementation as fire-and-forget: a failed send is
/// logged and never affects the booking result.
///
/// ## Thread safety
///
/// Implementations must be `Send + Sync` so a sender can be shared via
/// `Arc` and moved into the detached task that performs the send.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends a single email message.
    ///
    /// Errors are **delivery** errors; recipient validation happened
    /// upstream when the reservation was created.
    async fn send(&self, email: Email) -> Result<()>;
}
