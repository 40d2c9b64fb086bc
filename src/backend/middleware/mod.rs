//! Middleware Module
//!
//! HTTP middleware applied to the router.
//!
//! - **`auth`** - `x-auth-token` session check for protected routes

pub mod auth;

pub use auth::{auth_middleware, AuthGate, AuthRejection, AuthUser, AuthenticatedUser, AUTH_HEADER};
