//! HTTP error envelope.
//!
//! Every failing endpoint responds with `{"error": {"code", "message"}}`
//! so clients can branch on a stable code instead of parsing messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::dataset::DatasetError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Reasoning service unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    RoundLimit(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::BAD_GATEWAY,
            Self::RoundLimit(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Configuration(_) => "configuration",
            Self::Dataset(_) => "dataset",
            Self::Unavailable(_) => "service_unavailable",
            Self::RoundLimit(_) => "round_limit_exceeded",
            Self::Internal(_) => "internal_error",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<crate::Error> for ApiError {
    fn from(error: crate::Error) -> Self {
        match error {
            crate::Error::Configuration { message } => Self::Configuration(message),
            crate::Error::Service(e) => Self::Unavailable(e.to_string()),
            crate::Error::Dataset(e) => Self::Dataset(e.to_string()),
            e @ crate::Error::RoundLimit { .. } => Self::RoundLimit(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DatasetError> for ApiError {
    fn from(error: DatasetError) -> Self {
        Self::Dataset(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("no message").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(crate::Error::RoundLimit { rounds: 8 }).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(crate::Error::Service(ServiceError::MalformedReply(
                "no content".to_string()
            )))
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::from(crate::Error::RoundLimit { rounds: 8 }).error_code(),
            "round_limit_exceeded"
        );
        assert_eq!(
            ApiError::from(crate::Error::configuration("no key")).error_code(),
            "configuration"
        );
    }
}
