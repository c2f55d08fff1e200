//! SMTP transport adapter

use anyhow::Result;
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use tracing::debug;

use crate::domain::mail::{
    mailer::Mailer, message::AssembledMessage, request::SmtpConnection,
};

/// Mailer relaying messages through the SMTP server named in each request.
///
/// Unlike a fixed-relay setup there is no process-wide SMTP configuration:
/// host, port and credentials arrive with every request and a fresh
/// transport is built per send.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmtpMailer;

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new() -> Self {
        Self
    }

    fn transport(connection: &SmtpConnection) -> Result<SmtpTransport> {
        let credentials =
            Credentials::new(connection.login.clone(), connection.password.clone());

        Ok(SmtpTransport::starttls_relay(&connection.host)?
            .credentials(credentials)
            .port(connection.port)
            .build())
    }

    fn build_message(message: &AssembledMessage) -> Result<Message> {
        Ok(Message::builder()
            .from(message.from.parse::<Mailbox>()?)
            .to(message.to.parse::<Mailbox>()?)
            .reply_to(message.reply_to.parse::<Mailbox>()?)
            .subject(message.subject.clone())
            .singlepart(SinglePart::html(message.html_body.clone()))?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, connection: &SmtpConnection, message: &AssembledMessage) -> bool {
        let email = match Self::build_message(message) {
            Ok(email) => email,
            Err(err) => {
                debug!(error = %err, "could not build outgoing message");
                return false;
            }
        };

        let transport = match Self::transport(connection) {
            Ok(transport) => transport,
            Err(err) => {
                debug!(error = %err, host = %connection.host, "could not build SMTP transport");
                return false;
            }
        };

        match transport.send(&email) {
            Ok(_) => {
                debug!(to = %message.to, "mail sent successfully");
                true
            }
            Err(err) => {
                debug!(error = %err, "error sending email");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::mail::request::MailHeaders;

    use super::*;

    fn assembled_message(from: &str, to: &str) -> AssembledMessage {
        AssembledMessage::assemble(
            &MailHeaders {
                from: from.to_string(),
                to: to.to_string(),
                subject: "Your order".to_string(),
                reply_to: "support@example.com".to_string(),
            },
            "<p>Hello Alice</p>".to_string(),
        )
    }

    #[test]
    fn test_build_message_sets_headers() {
        let message =
            SmtpMailer::build_message(&assembled_message("shop@example.com", "customer@example.com"));

        assert!(message.is_ok());
    }

    #[test]
    fn test_build_message_rejects_invalid_address() {
        let message = SmtpMailer::build_message(&assembled_message("not an address", "also wrong"));

        assert!(message.is_err());
    }

    #[tokio::test]
    async fn test_send_collapses_bad_addresses_to_false() {
        let connection = SmtpConnection {
            host: "smtp.example.com".to_string(),
            port: 587,
            login: "relay".to_string(),
            password: "hunter2".to_string(),
        };

        let sent = SmtpMailer::new()
            .send(&connection, &assembled_message("not an address", "also wrong"))
            .await;

        assert!(!sent);
    }
}
