//! Domain module

pub mod mail;
