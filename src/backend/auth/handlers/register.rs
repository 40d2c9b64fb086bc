/**
 * Registration Handler
 *
 * `POST /api/users`: create an account and log it in.
 *
 * # Process
 *
 * 1. Validate name, email and password together
 * 2. Reject an email that is already registered
 * 3. Hash the password with bcrypt on the blocking pool
 * 4. Store the user with a Gravatar avatar
 * 5. Return a session token
 */
use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use chrono::Utc;

use crate::backend::auth::credentials::hash_password;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::identity::Identity;
use crate::shared::user::{gravatar_url, normalize_email, RegisterRequest, TokenResponse, User};
use crate::shared::validation::FieldError;

const USER_EXISTS_MSG: &str = "User already exists";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Validation failure or email already registered
/// * `500 Internal Server Error` - Store, hashing or signing failure
///
/// # Example Request
///
/// ```http
/// POST /api/users HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Ada", "email": "ada@example.com", "password": "analytical" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate().map_err(|errors| {
        tracing::warn!("Registration rejected: {} invalid fields", errors.len());
        ApiError::Validation(errors)
    })?;

    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    let name = request.name.unwrap_or_default().trim().to_string();
    let password = request.password.unwrap_or_default();

    if state.store.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("Registration for existing email: {}", email);
        return Err(ApiError::Validation(vec![FieldError::general(USER_EXISTS_MSG)]));
    }

    let password_hash = hash_password(state.credentials.clone(), password).await?;

    let user = User {
        id: Identity::generate(),
        name,
        avatar: gravatar_url(&email),
        email,
        password_hash,
        date: Utc::now(),
    };

    let user = match state.store.create_user(user).await {
        Ok(user) => user,
        Err(StoreError::Conflict(detail)) => {
            tracing::warn!("Registration lost a race: {}", detail);
            return Err(ApiError::Validation(vec![FieldError::general(USER_EXISTS_MSG)]));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.tokens.issue(&user.id)?;
    tracing::info!("User registered: {} ({})", user.id, user.email);

    Ok(Json(TokenResponse { token }))
}
