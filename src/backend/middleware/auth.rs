/**
 * Authentication Middleware
 *
 * This module protects routes that require a logged-in user. It reads the
 * session token from the `x-auth-token` header, verifies it, and attaches
 * the caller's identity to the request extensions for handlers to pick up
 * with the [`AuthUser`] extractor.
 *
 * A missing token is rejected without touching the verifier. Every verify
 * failure produces the same response; the specific reason is only logged.
 */
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::tokens::TokenVerifier;
use crate::backend::error::ApiError;
use crate::shared::identity::Identity;

/// Request header carrying the session token
pub const AUTH_HEADER: &str = "x-auth-token";

/// Why a request was refused by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("No token, authorization denied")]
    MissingToken,
    #[error("Token is not valid")]
    InvalidToken,
}

/// Authenticated caller attached to request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub identity: Identity,
}

/// Token check shared by all protected routes
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Resolve the caller's identity from request headers
    pub fn process(&self, headers: &HeaderMap) -> Result<Identity, AuthRejection> {
        let Some(value) = headers.get(AUTH_HEADER) else {
            tracing::warn!("Missing {} header", AUTH_HEADER);
            return Err(AuthRejection::MissingToken);
        };

        let token = value.to_str().map_err(|_| {
            tracing::warn!("Non-ASCII {} header", AUTH_HEADER);
            AuthRejection::InvalidToken
        })?;
        if token.is_empty() {
            tracing::warn!("Empty {} header", AUTH_HEADER);
            return Err(AuthRejection::MissingToken);
        }

        self.verifier.verify(token.trim()).map_err(|e| {
            tracing::warn!("Invalid token: {}", e);
            AuthRejection::InvalidToken
        })
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

/// Authentication middleware
///
/// Apply with `route_layer` so unmatched paths still produce 404s rather
/// than 401s.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = gate.process(request.headers())?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { identity });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
///
/// Only usable behind [`auth_middleware`]; elsewhere it rejects as if no
/// token had been sent.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn identity(&self) -> &Identity {
        &self.0.identity
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::Unauthenticated(AuthRejection::MissingToken)
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::tokens::{TokenCodec, TokenError};
    use axum::{
        body::{to_bytes, Body},
        http::{HeaderValue, Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    /// Accepts only "good", counting every call
    #[derive(Default)]
    struct CountingVerifier {
        calls: AtomicUsize,
    }

    impl TokenVerifier for CountingVerifier {
        fn verify(&self, token: &str) -> Result<Identity, TokenError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if token == "good" {
                Ok(Identity::new("u1"))
            } else {
                Err(TokenError::Malformed)
            }
        }
    }

    fn headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, HeaderValue::from_str(token).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_skips_verifier() {
        let verifier = Arc::new(CountingVerifier::default());
        let gate = AuthGate::new(verifier.clone());

        assert_eq!(gate.process(&HeaderMap::new()), Err(AuthRejection::MissingToken));
        assert_eq!(gate.process(&headers("")), Err(AuthRejection::MissingToken));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_token_is_invalid_not_missing() {
        let verifier = Arc::new(CountingVerifier::default());
        let gate = AuthGate::new(verifier.clone());

        assert_eq!(gate.process(&headers("   ")), Err(AuthRejection::InvalidToken));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_verifier_outcome() {
        let verifier = Arc::new(CountingVerifier::default());
        let gate = AuthGate::new(verifier.clone());

        assert_eq!(gate.process(&headers("good")), Ok(Identity::new("u1")));
        assert_eq!(gate.process(&headers("bad")), Err(AuthRejection::InvalidToken));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_same_token_same_outcome() {
        let codec = TokenCodec::new("secret", Duration::from_secs(60));
        let token = codec.issue(&Identity::new("u7")).unwrap();
        let gate = AuthGate::new(Arc::new(codec));

        let first = gate.process(&headers(&token));
        let second = gate.process(&headers(&token));
        assert_eq!(first, Ok(Identity::new("u7")));
        assert_eq!(first, second);
    }

    fn app(gate: AuthGate) -> Router {
        Router::new()
            .route(
                "/private",
                get(|user: AuthUser| async move { user.identity().to_string() }),
            )
            .route_layer(from_fn_with_state(gate, auth_middleware))
    }

    async fn call(app: Router, token: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/private");
        if let Some(token) = token {
            builder = builder.header(AUTH_HEADER, token);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_middleware_attaches_identity() {
        let gate = AuthGate::new(Arc::new(CountingVerifier::default()));
        assert_eq!(call(app(gate), Some("good")).await, (StatusCode::OK, "u1".to_string()));
    }

    #[tokio::test]
    async fn test_middleware_rejections() {
        let verifier = Arc::new(CountingVerifier::default());
        let gate = AuthGate::new(verifier.clone());

        let (status, body) = call(app(gate.clone()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"msg":"No token, authorization denied"}"#);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);

        let (status, body) = call(app(gate), Some("garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"msg":"Token is not valid"}"#);
    }

    #[tokio::test]
    async fn test_extractor_without_middleware() {
        let app = Router::new().route(
            "/private",
            get(|user: AuthUser| async move { user.identity().to_string() }),
        );
        let (status, _) = call(app, Some("good")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
