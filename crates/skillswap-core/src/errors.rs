//! Application error type and its JSON representation.
//!
//! Every failed request is answered with an [`ErrorBody`]:
//!
//! ```json
//! { "success": false, "message": "Invalid token", "code": "INVALID_TOKEN" }
//! ```
//!
//! `code` lets clients branch on the failure kind without matching on the
//! human-readable message.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "User not authenticated";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Machine-readable failure kind carried next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthenticated,
    InvalidToken,
    Forbidden,
    BadRequest,
    ValidationFailed,
    NotFound,
    AlreadyRated,
    AlreadyReviewed,
    Internal,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    /// Absent when talking to servers that predate structured codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, code: ErrorCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code,
            error: err.into(),
        }
    }

    fn with_message(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(status, code, anyhow::anyhow!(message.into()))
    }

    /// No credential was presented.
    pub fn unauthenticated() -> Self {
        Self::with_message(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthenticated,
            NOT_AUTHENTICATED_MESSAGE,
        )
    }

    /// A credential was presented but did not verify.
    pub fn invalid_token() -> Self {
        Self::with_message(
            StatusCode::UNAUTHORIZED,
            ErrorCode::InvalidToken,
            INVALID_TOKEN_MESSAGE,
        )
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal, err)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::FORBIDDEN, ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::with_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ValidationFailed,
            message,
        )
    }

    pub fn conflict(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::CONFLICT, code, message)
    }

    /// Message exposed to the caller. Server faults never leak their cause.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            message: self.public_message(),
            code: Some(self.code),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        (self.status, Json(self.body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
