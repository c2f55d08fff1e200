//! Assembled mail message

use crate::domain::mail::request::MailHeaders;

/// A fully assembled outgoing message.
///
/// The body is attached as HTML only; a plain text alternative is
/// deliberately not produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledMessage {
    /// The sender address
    pub from: String,

    /// The recipient address
    pub to: String,

    /// The message subject
    pub subject: String,

    /// The reply-to address
    pub reply_to: String,

    /// The rendered HTML body
    pub html_body: String,
}

impl AssembledMessage {
    /// Sets the four outgoing headers and attaches the rendered body as the
    /// HTML part.
    pub fn assemble(headers: &MailHeaders, html_body: String) -> Self {
        Self {
            from: headers.from.clone(),
            to: headers.to.clone(),
            subject: headers.subject.clone(),
            reply_to: headers.reply_to.clone(),
            html_body,
        }
    }
}
