//! Shared Module
//!
//! Domain types used by the HTTP handlers and the storage backends: users,
//! profiles, posts, the identity newtype, request validation and the
//! application configuration.
//!
//! None of these types depend on axum or sqlx, so they can be unit tested
//! without a running server.

/// Opaque principal identifier
pub mod identity;

/// Field-level request validation
pub mod validation;

/// Application configuration
pub mod config;

/// User records and auth request/response bodies
pub mod user;

/// Profiles with nested experience and education
pub mod profile;

/// Posts, likes and comments
pub mod post;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use identity::Identity;
pub use post::{Comment, Like, Post};
pub use profile::{Education, Experience, Profile, ProfileView};
pub use user::{PublicUser, User, UserSummary};
pub use validation::FieldError;
