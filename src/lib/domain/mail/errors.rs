//! Error types for the mail domain

use thiserror::Error;

/// An error that can occur while checking a request for required fields
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// A required connection parameter, mail header or app data key is absent
    #[error("Invalid number of arguments")]
    MissingArguments,
}

/// An error that can occur while resolving or rendering a message template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template could not be opened or read
    #[error("Can not open message template")]
    NotFound,

    /// The template references a variable the request did not supply
    #[error("Missing template variable \"{0}\"")]
    MissingVariable(String),
}
