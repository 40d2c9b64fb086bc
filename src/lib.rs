//! devconnect - Main Library
//!
//! devconnect is the backend of a small developer social network: users
//! register and log in, maintain a profile with their experience and
//! education, and write posts that other users can like and comment on.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types, validation and configuration
//!   - Users, profiles, posts, comments
//!   - `AppConfig` loaded from defaults, a TOML file and the environment
//!
//! - **`backend`** - Axum HTTP server
//!   - Stateless session tokens and the `x-auth-token` auth middleware
//!   - bcrypt credential checks and the resource ownership policy
//!   - Route handlers for users, auth, profiles, posts and the GitHub proxy
//!   - In-memory and PostgreSQL document stores
//!
//! # Usage
//!
//! ```rust,no_run
//! use devconnect::backend::server::create_app;
//! use devconnect::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every layer has its own `thiserror` enum (`TokenError`, `StoreError`,
//! `ConfigError`, `GithubError`). Handlers return `ApiError`, which converts
//! into a JSON HTTP response.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
