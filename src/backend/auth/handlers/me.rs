/**
 * Current User Handler
 *
 * `GET /api/auth`: the authenticated caller's account, without the password
 * hash. Requires the auth middleware.
 */
use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::store::Store;
use crate::shared::user::PublicUser;

/// # Errors
///
/// * `401 Unauthorized` - Missing or invalid token (from the middleware)
/// * `404 Not Found` - Token is valid but the account has been deleted
pub async fn get_me(
    user: AuthUser,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<PublicUser>, ApiError> {
    let account = store
        .find_user_by_id(user.identity())
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for deleted user: {}", user.identity());
            ApiError::not_found("User not found")
        })?;

    Ok(Json(account.public()))
}
