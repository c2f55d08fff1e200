//! Mail transport boundary

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::{message::AssembledMessage, request::SmtpConnection};

/// Mail transport adapter.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Relays an assembled message through the SMTP server described by
    /// `connection`.
    ///
    /// Returns `true` only on confirmed acceptance by the remote server.
    /// Every failure mode, from a bad address to a rejected recipient,
    /// collapses to `false` at this boundary.
    async fn send(&self, connection: &SmtpConnection, message: &AssembledMessage) -> bool;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, connection: &SmtpConnection, message: &AssembledMessage) -> bool;
    }
}
