use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use itemstore_core::item::{error_code, item_error_to_status_code, ItemError};

use crate::models::ErrorResponse;

/// Error response produced at the dispatch boundary.
///
/// Every failure a handler can hit ends up here and is rendered as a
/// structured `{"error","message","code"}` body; nothing propagates as a
/// transport-level fault.
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }
}

impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        let status = StatusCode::from_u16(item_error_to_status_code(&err))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = error_code(&err);

        // Server-side failures keep their detail in the logs, not the body.
        let message = if status.is_server_error() {
            tracing::error!(%err, code, "request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(%err, code, "request rejected");
            err.to_string()
        };

        Self {
            status,
            code,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: "Request failed",
            message: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}
