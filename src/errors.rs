use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;
use crate::database::StoreError;

pub type AppResponse<T> = Result<T, AppError>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    timestamp: String,
    status: u16,
    error: String,
    error_code: ErrorCode,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ContentNotFound,

    // General API & Validation Errors
    ValidationError,
    ServiceUnavailable,
    UnexpectedError,
}

impl ErrorCode {
    fn to_str(&self) -> String {
        match self {
            ErrorCode::UnexpectedError => "Server Error. Please try again later".to_string(),
            _ => format!("{:?}", self),
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Debug)]
pub struct HttpError {
    pub status_code: StatusCode,
    pub error_code: ErrorCode,
    pub message: String,
}

impl HttpError {

    pub fn new(status_code: StatusCode, error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            error_code,
            message: message.into(),
        }
    }

    pub fn bad_request(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_code, message)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {

        if self.status_code.is_server_error() {
            tracing::error!("An error occurred: status={}, code={:?}, msg='{}'", self.status_code, self.error_code, self.message);
        } else {
            tracing::debug!("Rejected request: status={}, code={:?}, msg='{}'", self.status_code, self.error_code, self.message);
        }

        let status = self.status_code;
        let error_response = ErrorResponse {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: self.message,
            error_code: self.error_code,
        };

        (status, Json(error_response)).into_response()
    }
}

pub enum AppError {
    /// The client sent a parameter outside the accepted value set.
    InvalidParameter(String),

    /// A requested entry does not exist.
    NotFound(String),

    /// The user store could not answer a count or page query. The original error is kept for
    /// logging only, the client gets a generic message.
    StoreUnavailable(StoreError),
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "InvalidParameter: {}", msg),
            Self::NotFound(msg) => write!(f, "NotFound: {}", msg),
            Self::StoreUnavailable(err) => write!(f, "StoreUnavailable: {:?}", err),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            AppError::NotFound(msg) => write!(f, "Entity not found: {}", msg),
            AppError::StoreUnavailable(err) => write!(f, "User store unavailable: {}", err),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> AppError {
        AppError::StoreUnavailable(err)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::StoreUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {

        let http_error = match self {
            AppError::InvalidParameter(msg) => {
                HttpError::bad_request(ErrorCode::ValidationError, msg)
            }
            AppError::NotFound(msg) => {
                HttpError::new(StatusCode::NOT_FOUND, ErrorCode::ContentNotFound, msg)
            }
            AppError::StoreUnavailable(internal_err) => {
                tracing::error!("User store error: {:?}", internal_err);
                let error_code = match internal_err {
                    StoreError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)) => ErrorCode::ServiceUnavailable,
                    StoreError::Database(_) => ErrorCode::UnexpectedError,
                    StoreError::Timeout(_) | StoreError::Unavailable(_) => ErrorCode::ServiceUnavailable,
                };
                HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, error_code, "Failed to fetch users")
            }
        };

        http_error.into_response()
    }
}
