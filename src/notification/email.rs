use lettre::message::Mailbox;

/// A Value Object representing a complete email message.
///
/// Transport-agnostic: it describes *what* should be sent (subject,
/// recipient, body), not how. The SMTP adapter turns it into a MIME
/// message; tests can capture it as-is.
#[derive(Debug, Clone)]
pub struct Email {
    /// Email subject line.
    ///
    /// Header-injection sanitization happens in the transport adapter,
    /// where the wire format is known.
    pub subject: String,

    /// The recipient. Booking confirmations always address exactly one
    /// client.
    pub to: Mailbox,

    /// Email body representation.
    pub body: EmailBody,
}

/// The body representation of an email.
///
/// - `Text` -> `text/plain`
/// - `TextAndHtml` -> `multipart/alternative` (text/plain + text/html)
#[derive(Debug, Clone)]
pub enum EmailBody {
    /// Plain text only.
    Text(String),

    /// Plain text plus an HTML alternative; mail clients pick one.
    TextAndHtml { text: String, html: String },
}
