//! HTTP error responses
//!
//! Every failure is reported as a JSON object with a single `error` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error returned by request handlers
#[derive(Debug)]
pub enum ApiError {
    /// Client supplied an unusable request (400)
    BadRequest(String),
    /// Any unhandled failure while serving the request (500)
    Internal(anyhow::Error),
}

impl ApiError {
    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `error` field
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Internal(err) => format!("An error occurred: {:#}", err),
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        match &self {
            ApiError::BadRequest(_) => tracing::debug!("Rejected request: {}", message),
            ApiError::Internal(_) => tracing::error!("{}", message),
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
