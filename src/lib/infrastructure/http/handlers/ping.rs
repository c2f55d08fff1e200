//! Liveness handler

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    /// Always `"pong"`
    #[schema(example = "pong")]
    pub ping: String,
}

/// Liveness check
#[utoipa::path(
    get,
    operation_id = "ping",
    tag = "System",
    path = "/ping",
    responses(
        (status = StatusCode::OK, description = "The process is running", body = PingResponse),
    )
)]
pub async fn handler() -> Json<PingResponse> {
    Json(PingResponse {
        ping: "pong".to_string(),
    })
}
