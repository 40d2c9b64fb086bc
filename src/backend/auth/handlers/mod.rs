//! Authentication Handlers Module
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── register.rs  - POST /api/users
//! ├── login.rs     - POST /api/auth
//! └── me.rs        - GET /api/auth
//! ```
//!
//! Request and response bodies live in `shared::user`.

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;
