//! Server Module
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - Storage backend selection
//! - **`init`** - Server initialization and app creation
//!
//! # Example
//!
//! ```rust,no_run
//! use devconnect::backend::server::create_app;
//! use devconnect::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::load()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Store bootstrap
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::{AppState, InitError};
