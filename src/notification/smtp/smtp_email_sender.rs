use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::info;

use crate::config::mail::MailConfig;
use crate::notification::{
    email::{Email, EmailBody},
    email_sender::EmailSender,
};

/// SMTP-based implementation of [`EmailSender`].
///
/// ## Responsibilities
///
/// - Builds a MIME-compliant message from [`Email`]
/// - Sends it via SMTP using STARTTLS (typically port 587)
///
/// ## What this type does *not* do
///
/// - Decide whether an email should be sent (the booking service does)
/// - Read configuration sources itself (it receives a [`MailConfig`]
///   constructed once at startup)
#[derive(Clone, Debug)]
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Constructs a sender from a loaded [`MailConfig`].
    pub fn from_config(cfg: &MailConfig) -> Result<Self> {
        info!(
            "SMTP init: host={} port={} user={} from={}",
            cfg.host, cfg.port, cfg.username, cfg.from_email
        );

        let creds = Credentials::new(cfg.username.clone(), cfg.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
            .with_context(|| format!("invalid relay host: {}", cfg.host))?
            .port(cfg.port)
            .credentials(creds)
            .build();

        let from = Mailbox::new(Some(cfg.from_name.clone()), cfg.from_email.parse()?);

        Ok(Self { mailer, from })
    }

    /// Builds a `lettre::Message` from an [`Email`].
    ///
    /// Kept separate from `send` so MIME construction is unit-testable
    /// without SMTP I/O.
    fn build_message(&self, email: Email) -> Result<Message> {
        // Strip CR/LF from the subject to prevent header injection
        let mut subject = email.subject;
        subject.retain(|c| c != '\r' && c != '\n');

        let builder = Message::builder()
            .from(self.from.clone())
            .to(email.to)
            .subject(subject);

        let message = match email.body {
            EmailBody::Text(text) => builder.singlepart(SinglePart::plain(text))?,

            EmailBody::TextAndHtml { text, html } => {
                let alternative = MultiPart::alternative()
                    .singlepart(SinglePart::plain(text))
                    .singlepart(SinglePart::html(html));
                builder.multipart(alternative)?
            }
        };

        Ok(message)
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: Email) -> Result<()> {
        let message = self.build_message(email)?;
        self.mailer
            .send(message)
            .await
            .context("SMTP send failed")?;
        Ok(())
    }
}
