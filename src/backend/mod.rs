//! Backend Module
//!
//! The Axum HTTP server.
//!
//! - **`server`** - Application state and initialization
//! - **`routes`** - Router assembly
//! - **`middleware`** - `x-auth-token` authentication
//! - **`auth`** - Tokens, credentials, ownership, auth endpoints
//! - **`profile`** - Profile endpoints and GitHub proxy
//! - **`posts`** - Post, like and comment endpoints
//! - **`store`** - In-memory and PostgreSQL persistence
//! - **`github`** - GitHub REST client
//! - **`error`** - `ApiError` and its HTTP mapping
//!
//! # Request Pipeline
//!
//! ```text
//! client -> TraceLayer -> [auth_middleware] -> handler -> Store
//!                                                 \-> ensure_owner (mutations)
//! ```
//!
//! The auth core keeps no mutable state; handlers share only the store.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Profile handlers
pub mod profile;

/// Post handlers
pub mod posts;

/// Persistence
pub mod store;

/// GitHub API client
pub mod github;

pub use error::ApiError;
pub use server::create_app;
