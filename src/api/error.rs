use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::services::SyncError;

/// Failures as they appear on the wire. The `String` payloads are internal
/// detail for the logs; clients only ever see the fixed message.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,

    UserExists,

    BadRequest(String),

    NotFound,

    MethodNotAllowed,

    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::UserExists => write!(f, "User already exists"),
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::NotFound => write!(f, "Not found"),
            Self::MethodNotAllowed => write!(f, "Method not allowed"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserExists => StatusCode::PAYMENT_REQUIRED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Application error code carried in the JSON envelope.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::UserExists => 2002,
            Self::BadRequest(_) => 2003,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Internal(_) => 500,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::UserExists => "User Exists",
            Self::BadRequest(_) => "Bad request",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Internal(_) => "Internal Server Error",
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest(msg) => tracing::debug!("Rejected request: {}", msg),
            Self::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Unauthorized => Self::Unauthorized,
            SyncError::UserExists => Self::UserExists,
            SyncError::BadRequest(msg) => Self::BadRequest(msg),
            SyncError::Database(msg) => Self::Internal(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}
