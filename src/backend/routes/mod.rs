//! Route Configuration Module
//!
//! - **`router`** - Main router creation and layers
//! - **`api_routes`** - `/api` endpoints, split into public and protected

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
