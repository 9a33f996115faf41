//! SMTP relay transport
//!
//! One `deliver` call runs one complete relay session: connect, STARTTLS,
//! authenticate, hand over the message, quit. A fresh transport per call
//! keeps failures isolated; nothing is pooled between sends.

use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use crate::config::SmtpConfig;
use crate::utils::errors::DispatchResult;

/// Blocking relay seam between the dispatch engine and the wire
pub trait MailTransport: Send + Sync {
    fn deliver(&self, message: &Message) -> DispatchResult<()>;
}

/// STARTTLS relay backed by the configured SMTP account
#[derive(Debug, Clone)]
pub struct SmtpRelayTransport {
    config: SmtpConfig,
}

impl SmtpRelayTransport {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl MailTransport for SmtpRelayTransport {
    fn deliver(&self, message: &Message) -> DispatchResult<()> {
        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let transport = SmtpTransport::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(self.config.timeout_seconds)))
            .build();

        let response = transport.send(message)?;
        debug!(code = %response.code(), "Relay accepted message");
        Ok(())
    }
}
