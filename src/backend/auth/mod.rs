//! Authentication Module
//!
//! Sessions, credentials and the ownership policy.
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── tokens.rs       - Signed session tokens (HS256)
//! ├── credentials.rs  - bcrypt password hashing and login checks
//! ├── ownership.rs    - Who may modify an owned resource
//! └── handlers/       - Register, login and current-user endpoints
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user stored → token returned
//! 2. **Login**: email, password → credentials verified → token returned
//! 3. **Protected request**: `x-auth-token` header → token verified by the
//!    auth middleware → identity available to the handler
//!
//! Tokens are stateless and valid until they expire.

/// Session token issue/verify
pub mod tokens;

/// Password hashing and verification
pub mod credentials;

/// Resource ownership policy
pub mod ownership;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use credentials::CredentialVerifier;
pub use handlers::{get_me, login, register};
pub use ownership::{authorize, ensure_owner, Authorization, Owned};
pub use tokens::{Claims, TokenCodec, TokenError, TokenVerifier};
