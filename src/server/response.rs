use axum::http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::TaskboardError;

/// A `TaskboardError` rendered as `{"message", "code"}` with its HTTP status.
#[derive(Debug)]
pub struct ApiError(pub TaskboardError);

impl From<TaskboardError> for ApiError {
    fn from(e: TaskboardError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = err.code.as_str(), "{}", err.message);
        } else {
            tracing::warn!(code = err.code.as_str(), "{}", err.message);
        }

        let body = json!({
            "message": err.message,
            "code": err.code.as_str(),
        });
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
