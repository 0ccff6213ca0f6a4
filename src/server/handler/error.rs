use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::chat::engine::ChatError;

/// A chat failure on its way out as `{"error": ...}`.
pub struct ApiError(pub ChatError);

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ChatError::Validation(detail) => {
                log::warn!("rejected chat request: {detail}");
                StatusCode::BAD_REQUEST
            }
            ChatError::Attachment(why) => {
                log::warn!("rejected attachment: {why}");
                StatusCode::BAD_REQUEST
            }
            ChatError::ClientConfig(why) => {
                log::error!("client unavailable: {why}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
