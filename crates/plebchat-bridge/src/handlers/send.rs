//! Inbound request handler: chat application → platform.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::relay::{ImageRef, RelayError};
use crate::response;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct SendToDiscordRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "imageData")]
    image_data: Option<String>,
}

#[derive(Serialize)]
pub struct SendToDiscordResponse {
    success: bool,
    message: String,
}

/// POST /send-to-discord
pub async fn send_to_discord(
    State(state): State<AppState>,
    Json(req): Json<SendToDiscordRequest>,
) -> Response {
    let name = req.name.unwrap_or_default();
    let image = req.image_data.map(ImageRef::Data);

    match state.outbound.relay(&name, req.text.as_deref(), image).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SendToDiscordResponse {
                success: true,
                message: "Message sent to Discord".to_string(),
            }),
        )
            .into_response(),
        Err(RelayError::Validation(message)) => response::bad_request(message).into_response(),
        Err(e) => response::internal_error(e.to_string()).into_response(),
    }
}
