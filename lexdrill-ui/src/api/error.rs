//! Error-to-response mapping for the JSON API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lexdrill_core::Error;
use serde_json::json;
use tracing::error;

/// Handler result type
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Newtype carrying a core error across the axum boundary
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidArgument(_) | Error::EmptySelection(_) => StatusCode::BAD_REQUEST,
            Error::InvalidState(_) => StatusCode::CONFLICT,
            Error::UnknownSession(_) => StatusCode::NOT_FOUND,
            Error::Config(_) | Error::Io(_) | Error::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("request failed: {}", self.0);
        }
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
