/**
 * Login Handler
 *
 * `POST /api/auth`: exchange email and password for a session token.
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same 400 body
 * - An unknown email still costs one bcrypt comparison
 * - Passwords are never logged
 */
use axum::{extract::rejection::JsonRejection, extract::State, response::Json};

use crate::backend::auth::credentials::verify_login;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::user::{normalize_email, LoginRequest, TokenResponse};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Validation failure or invalid credentials
/// * `500 Internal Server Error` - Store or signing failure
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    let password = request.password.unwrap_or_default();

    let user = state.store.find_user_by_email(&email).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());

    let matched = verify_login(state.credentials.clone(), password, stored_hash).await?;

    let user = match user {
        Some(user) if matched => user,
        _ => {
            tracing::warn!("Failed login for: {}", email);
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state.tokens.issue(&user.id)?;
    tracing::info!("User logged in: {} ({})", user.id, user.email);

    Ok(Json(TokenResponse { token }))
}
