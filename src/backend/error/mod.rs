//! Backend Error Module
//!
//! - **`types`** - `ApiError` and its status code mapping
//! - **`conversion`** - `IntoResponse` and `From` conversions
//!
//! Handlers return `Result<_, ApiError>` and use `?` on store, credential,
//! token and GitHub errors.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
