//! HTTP handlers

pub mod docs;
pub mod ping;
pub mod send_email;
