//! Error handling for the gateway.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jokebox_core::{ErrorKind, ValidationError};

use crate::json::ErrorResponse;

/// Application error type.
#[derive(Debug)]
pub struct AppError(jokebox_core::Error);

impl AppError {
    /// Wrapped service error.
    pub fn inner(&self) -> &jokebox_core::Error {
        &self.0
    }

    /// Response status for this error.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.0.to_string(),
            error: self.0.detail(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<jokebox_core::Error> for AppError {
    fn from(err: jokebox_core::Error) -> Self {
        AppError(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        ValidationError::MissingFields.into()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        // An id that cannot even be decoded matches no record.
        tracing::debug!(error = %rejection.body_text(), "rejected path parameter");
        jokebox_core::Error::JokeNotFound.into()
    }
}
