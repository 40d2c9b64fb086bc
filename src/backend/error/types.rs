/**
 * API Error Types
 *
 * `ApiError` is the error type of every HTTP handler. Each variant maps to a
 * fixed status code and JSON body (see `conversion.rs`).
 *
 * # Status Code Mapping
 *
 * - `Unauthenticated`, `Forbidden` - 401 Unauthorized
 * - `NotFound` - 404 Not Found
 * - `BadRequest`, `Validation`, `InvalidCredentials` - 400 Bad Request
 * - `Upstream` - 502 Bad Gateway, for an unreachable or timed-out GitHub.
 *   The one status outside the 400/401/404/500 set.
 * - `Store`, `Internal` - 500 Internal Server Error
 *
 * Server-side failures never expose their cause to the client; the detail is
 * logged and the body is always `{"msg":"Server Error"}`.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::middleware::auth::AuthRejection;
use crate::backend::store::StoreError;
use crate::shared::validation::FieldError;

pub const SERVER_ERROR_MSG: &str = "Server Error";
pub const NOT_AUTHORIZED_MSG: &str = "User not authorized";
pub const INVALID_CREDENTIALS_MSG: &str = "Invalid credentials";
pub const UPSTREAM_MSG: &str = "Github is unavailable";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid session token
    #[error(transparent)]
    Unauthenticated(#[from] AuthRejection),

    /// Caller is authenticated but does not own the resource
    #[error("{}", NOT_AUTHORIZED_MSG)]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// One or more request fields failed validation
    #[error("validation failed ({} errors)", .0.len())]
    Validation(Vec<FieldError>),

    /// Unknown email or wrong password; the two are indistinguishable
    #[error("{}", INVALID_CREDENTIALS_MSG)]
    InvalidCredentials,

    /// The GitHub API could not be reached
    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) | Self::Forbidden => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn message(&self) -> String {
        match self {
            Self::Unauthenticated(rejection) => rejection.to_string(),
            Self::Forbidden => NOT_AUTHORIZED_MSG.to_string(),
            Self::NotFound(message) | Self::BadRequest(message) => message.clone(),
            Self::Validation(_) => "Validation failed".to_string(),
            Self::InvalidCredentials => INVALID_CREDENTIALS_MSG.to_string(),
            Self::Upstream(_) => UPSTREAM_MSG.to_string(),
            Self::Store(_) | Self::Internal(_) => SERVER_ERROR_MSG.to_string(),
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}
