//! Common test utilities and helpers
//!
//! - A `TestServer` wired to the in-memory store
//! - Account and token helpers
//! - Response assertions
//! - GitHub API mocks

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod mock_server;

pub use assertions::*;
pub use auth_helpers::*;
pub use mock_server::*;

use axum_test::TestServer;
use devconnect::backend::routes::create_router;
use devconnect::backend::server::AppState;
use devconnect::backend::store::MemoryStore;
use devconnect::shared::AppConfig;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Configuration with the cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .build()
        .expect("test config")
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: AppConfig) -> TestApp {
    let state = AppState::new(config, Arc::new(MemoryStore::new())).expect("app state");
    let server = TestServer::new(create_router(state.clone())).expect("test server");
    TestApp { server, state }
}
