use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::json_error::JsonError;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    JsonError::new(StatusCode::NOT_FOUND, "Not found").into_response()
}
