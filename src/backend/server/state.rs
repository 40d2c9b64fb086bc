/**
 * Application State Management
 *
 * `AppState` holds every service a handler may need. All fields are cheap to
 * clone (`Arc`s or already reference counted) so Axum can clone the state
 * into each request.
 *
 * The `FromRef` implementations let middleware and handlers extract just the
 * part they use, e.g. `State<AuthGate>` in the auth middleware.
 */
use axum::extract::FromRef;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::credentials::{CredentialError, CredentialVerifier};
use crate::backend::auth::tokens::TokenCodec;
use crate::backend::github::{GithubClient, GithubError};
use crate::backend::middleware::auth::AuthGate;
use crate::backend::store::{Store, StoreError};
use crate::shared::config::{AppConfig, ConfigError};

#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build GitHub client: {0}")]
    Github(#[from] GithubError),
    #[error("failed to prepare credential verifier: {0}")]
    Credentials(#[from] CredentialError),
    /// `DATABASE_URL` is set but the database cannot be used
    #[error("database unavailable: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenCodec>,
    pub gate: AuthGate,
    pub credentials: Arc<CredentialVerifier>,
    pub github: GithubClient,
}

impl AppState {
    /// Wire the services for `config` on top of `store`
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Result<Self, InitError> {
        config.validate()?;

        let tokens = Arc::new(TokenCodec::from_config(&config));
        let gate = AuthGate::new(tokens.clone());
        let credentials = Arc::new(CredentialVerifier::new(config.bcrypt_cost)?);
        let github = GithubClient::from_config(&config)?;

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
            gate,
            credentials,
            github,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl FromRef<AppState> for AuthGate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
