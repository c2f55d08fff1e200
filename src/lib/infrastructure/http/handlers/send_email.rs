//! Send email handler

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::HeaderMap,
    Json,
};
use tracing::debug;

use crate::{
    domain::mail::{
        mailer::Mailer, message::AssembledMessage, request::EmailRequest,
        template::TemplateStore,
    },
    infrastructure::http::{
        auth,
        errors::{ApiError, MessageResponse},
        state::AppState,
    },
};

/// Renders the named template with the supplied application data and relays
/// the resulting message through the caller's SMTP server.
#[utoipa::path(
    post,
    operation_id = "send_email",
    tag = "Mail",
    path = "/send_email",
    request_body = EmailRequest,
    responses(
        (status = StatusCode::OK, description = "Email sent", body = MessageResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing required fields", body = MessageResponse, example = json!({"message": "Invalid number of arguments"})),
        (status = StatusCode::FORBIDDEN, description = "Credential validation failed", body = MessageResponse, example = json!({"message": "Could not validate credentials"})),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Template or transport failure", body = MessageResponse, example = json!({"message": "Can not open message template"})),
    )
)]
pub async fn handler<M: Mailer, T: TemplateStore>(
    State(state): State<AppState<M, T>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    request: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth::authenticate(&state.config, &query, &headers)?;

    let Json(request) = request?;
    let request = request.validate()?;

    let template = state.templates.load(&request.template_name).await?;
    let html = template.substitute(&request.variables)?;
    let message = AssembledMessage::assemble(&request.headers, html);

    let to = request.headers.to.clone();
    let order_number = request.order_number().to_string();

    if state.mailer.send(&request.connection, &message).await {
        debug!(to = %to, "mail sent successfully");

        Ok(Json(MessageResponse {
            message: format!("Email sent successfully to {to} for order number {order_number}"),
        }))
    } else {
        debug!(to = %to, "error sending email");

        Err(ApiError::new_500(&format!(
            "Email could not be sent to {to} for order number {order_number}"
        )))
    }
}
