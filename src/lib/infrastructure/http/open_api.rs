//! OpenAPI module

use utoipa::OpenApi;

use crate::{
    domain::mail::request::{AppData, ConnectionParams, EmailRequest, HeaderParams},
    infrastructure::http::{errors::MessageResponse, handlers::*},
};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Mail Relay"),
    paths(send_email::handler, ping::handler),
    components(schemas(
        EmailRequest,
        ConnectionParams,
        HeaderParams,
        AppData,
        ping::PingResponse,
        MessageResponse,
    ))
)]
/// The service's OpenAPI document
pub struct ApiDocs;
