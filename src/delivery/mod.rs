//! Digest assembly and delivery.

pub mod archive;
pub mod digest;
pub mod error;
pub mod smtp;

pub use archive::SummaryArchive;
pub use digest::{Digest, DigestEntry, EntryOutcome};
pub use error::DeliveryError;
pub use smtp::SmtpMailer;

use async_trait::async_trait;

/// A plain-text mail ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Delivery channel for the digest.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `mail` to the configured receiver.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), DeliveryError>;
}
