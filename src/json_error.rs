//! The JSON body sent to clients when a request fails.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// An error response of the form
/// `{"success": "false", "error": "...", "status": 400}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonError {
    success: &'static str,
    error: String,
    status: u16,
}

impl JsonError {
    /// Create an error response with `status` and a human readable `message`.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: "false",
            error: message.into(),
            status: status.as_u16(),
        }
    }

    /// The response for errors whose details are only meant for the server logs.
    pub fn internal_server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An unexpected error occurred, check the server logs for more details.",
        )
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}
