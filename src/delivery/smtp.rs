//! SMTP delivery via `lettre`.
//!
//! Relays such as Postmark accept the same server token as both username
//! and password over STARTTLS on port 587.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::error::DeliveryError;
use super::{Mailer, OutgoingMail};

/// Default submission port (STARTTLS).
pub const DEFAULT_RELAY_PORT: u16 = 587;

/// Sends mail through an SMTP relay.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer for `relay_host:port`.
    ///
    /// Port 465 uses implicit TLS; every other port uses STARTTLS. When
    /// `token` is set it is sent as both username and password.
    ///
    /// # Errors
    /// Returns [`DeliveryError::Config`] for unparsable addresses or relay
    /// host.
    pub fn new(
        relay_host: &str,
        port: u16,
        token: Option<&str>,
        sender: &str,
        receiver: &str,
    ) -> Result<Self, DeliveryError> {
        let from: Mailbox = sender
            .parse()
            .map_err(|e: lettre::address::AddressError| DeliveryError::Config(e.to_string()))?;
        let to: Mailbox = receiver
            .parse()
            .map_err(|e: lettre::address::AddressError| DeliveryError::Config(e.to_string()))?;

        let mut builder = if port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(relay_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(relay_host)
        }
        .map_err(|e| DeliveryError::Config(e.to_string()))?
        .port(port);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.credentials(Credentials::new(token.to_string(), token.to_string()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }
}

/// Build the RFC 5322 message for `mail`.
fn build_message(from: &Mailbox, to: &Mailbox, mail: &OutgoingMail) -> Result<Message, DeliveryError> {
    Message::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|e| DeliveryError::Message(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), DeliveryError> {
        let message = build_message(&self.from, &self.to, mail)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Smtp(e.to_string()))?;

        tracing::info!(
            subject = %mail.subject,
            to = %self.to,
            "digest delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let mailer = SmtpMailer::new(
            "smtp.postmarkapp.com",
            DEFAULT_RELAY_PORT,
            Some("server-token"),
            "Curator <digest@example.com>",
            "reader@example.com",
        );
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_new_implicit_tls_port() {
        let mailer = SmtpMailer::new(
            "smtp.example.com",
            465,
            None,
            "digest@example.com",
            "reader@example.com",
        );
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_new_invalid_sender() {
        let result = SmtpMailer::new(
            "smtp.example.com",
            DEFAULT_RELAY_PORT,
            None,
            "not-an-email",
            "reader@example.com",
        );
        let err = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("Configuration error"), "got: {err}");
    }

    #[test]
    fn test_new_invalid_receiver() {
        let result = SmtpMailer::new(
            "smtp.example.com",
            DEFAULT_RELAY_PORT,
            None,
            "digest@example.com",
            "nope",
        );
        assert!(matches!(result, Err(DeliveryError::Config(_))));
    }

    #[test]
    fn test_build_message_headers() {
        let from: Result<Mailbox, _> = "digest@example.com".parse();
        let to: Result<Mailbox, _> = "reader@example.com".parse();
        let (Ok(from), Ok(to)) = (from, to) else {
            unreachable!("static addresses parse")
        };
        let mail = OutgoingMail {
            subject: "Daily Summaries - 2024-03-07".to_string(),
            body: "1. https://a.example\nsummary\n\n".to_string(),
        };

        let message = build_message(&from, &to, &mail);
        let raw = message
            .map(|m| String::from_utf8_lossy(&m.formatted()).into_owned())
            .unwrap_or_default();
        assert!(raw.contains("Subject: Daily Summaries - 2024-03-07"));
        assert!(raw.contains("To: reader@example.com"));
        assert!(raw.contains("Content-Type: text/plain"));
    }
}
