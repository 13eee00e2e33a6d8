//! HTTP error mapping.
//!
//! Every failure leaves the API as an [`ErrorResponseBody`] carrying one of
//! the fixed [`ErrorCode`]s.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use service::ServiceError;
use thiserror::Error;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFoundError,
    ValidationError,
    AlreadyExistError,
    GenericError,
}

/// JSON body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    pub error_code: ErrorCode,
    pub error_message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request could not be parsed (body, path, or query).
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            ApiError::Service(ServiceError::Generic(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::Service(ServiceError::NotFound(_)) => ErrorCode::NotFoundError,
            ApiError::Service(ServiceError::Validation(_)) => ErrorCode::ValidationError,
            ApiError::Service(ServiceError::AlreadyExists { .. }) => ErrorCode::AlreadyExistError,
            ApiError::Service(ServiceError::Generic(_)) => ErrorCode::GenericError,
            ApiError::BadRequest(_) => ErrorCode::ValidationError,
        }
    }
}

impl From<&ApiError> for ErrorResponseBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error_code: err.error_code(),
            error_message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponseBody::from(&self));
        (self.status_code(), body).into_response()
    }
}
