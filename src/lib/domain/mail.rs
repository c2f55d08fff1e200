//! Mail domain: request contract, templates, message assembly and the
//! transport boundary.

pub mod errors;
pub mod mailer;
pub mod message;
pub mod request;
pub mod template;
