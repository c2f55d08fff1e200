//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::mail::errors::{RequestError, TemplateError};

/// A response carrying a single human-readable message.
///
/// Successes and failures share this shape; only the status code differs.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    /// The message text
    #[schema(example = "Email sent successfully to customer@example.com for order number 123")]
    pub message: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize)]
pub struct ApiError {
    /// The status code
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a new forbidden error
    pub fn new_403(message: &str) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Create a new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::MissingArguments => ApiError::new_400(&err.to_string()),
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound => ApiError::new_500(&err.to_string()),
            TemplateError::MissingVariable(_) => ApiError::new_500(&err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}
