/**
 * Server Initialization
 *
 * Builds the application state and router from a loaded `AppConfig`.
 *
 * 1. Validate the configuration
 * 2. Choose the store (PostgreSQL when configured, in-memory otherwise)
 * 3. Wire token codec, auth gate, credential verifier and GitHub client
 * 4. Assemble the router
 */
use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::{AppState, InitError};
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing devconnect backend server");
    config.validate()?;

    let store = load_store(&config).await?;
    let app_state = AppState::new(config, store)?;

    tracing::info!(
        "Token lifetime {}s, bcrypt cost {}",
        app_state.config.token_ttl.as_secs(),
        app_state.config.bcrypt_cost
    );

    Ok(create_router(app_state))
}
