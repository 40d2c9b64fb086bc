/**
 * Error Conversion
 *
 * `IntoResponse` for `ApiError`, plus `From` conversions from the errors of
 * the lower layers so handlers can use `?` throughout.
 *
 * # Response Format
 *
 * Validation failures:
 * ```json
 * { "errors": [ { "field": "email", "msg": "Please include a valid email" } ] }
 * ```
 *
 * Invalid credentials use the same shape without a field. Everything else:
 * ```json
 * { "msg": "Post not found" }
 * ```
 */
use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::auth::credentials::CredentialError;
use crate::backend::auth::tokens::TokenError;
use crate::backend::error::types::ApiError;
use crate::backend::github::GithubError;
use crate::shared::validation::FieldError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Self::Validation(errors) => json!({ "errors": errors }),
            Self::InvalidCredentials => {
                json!({ "errors": [FieldError::general(self.message())] })
            }
            Self::Store(e) => {
                tracing::error!("Store error: {}", e);
                json!({ "msg": self.message() })
            }
            Self::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                json!({ "msg": self.message() })
            }
            Self::Upstream(detail) => {
                tracing::error!("GitHub request failed: {}", detail);
                json!({ "msg": self.message() })
            }
            _ => json!({ "msg": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Only signing can fail on the issuing side; verification failures are
/// handled by the auth middleware.
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<GithubError> for ApiError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::NotFound { .. } | GithubError::InvalidUsername(_) => {
                tracing::warn!("GitHub lookup failed: {}", err);
                Self::NotFound("No Github profile found".to_string())
            }
            GithubError::Http(e) => Self::Upstream(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::middleware::auth::AuthRejection;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use serde_json::Value;

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_auth_bodies() {
        assert_eq!(
            render(AuthRejection::MissingToken.into()).await,
            (StatusCode::UNAUTHORIZED, json!({ "msg": "No token, authorization denied" }))
        );
        assert_eq!(
            render(AuthRejection::InvalidToken.into()).await,
            (StatusCode::UNAUTHORIZED, json!({ "msg": "Token is not valid" }))
        );
        assert_eq!(
            render(ApiError::Forbidden).await,
            (StatusCode::UNAUTHORIZED, json!({ "msg": "User not authorized" }))
        );
    }

    #[tokio::test]
    async fn test_validation_body() {
        let (status, body) = render(ApiError::Validation(vec![
            FieldError::new("status", "Status is required"),
            FieldError::new("skills", "Skills is required"),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "errors": [
                { "field": "status", "msg": "Status is required" },
                { "field": "skills", "msg": "Skills is required" }
            ]})
        );
    }

    #[tokio::test]
    async fn test_invalid_credentials_body() {
        assert_eq!(
            render(ApiError::InvalidCredentials).await,
            (StatusCode::BAD_REQUEST, json!({ "errors": [{ "msg": "Invalid credentials" }] }))
        );
    }

    #[tokio::test]
    async fn test_server_error_body() {
        assert_eq!(
            render(ApiError::internal("db down")).await,
            (StatusCode::INTERNAL_SERVER_ERROR, json!({ "msg": "Server Error" }))
        );
    }

    #[tokio::test]
    async fn test_github_not_found() {
        let error: ApiError = GithubError::NotFound { status: 404 }.into();
        assert_eq!(
            render(error).await,
            (StatusCode::NOT_FOUND, json!({ "msg": "No Github profile found" }))
        );
    }
}
