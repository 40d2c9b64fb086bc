//! Profile Module
//!
//! Profile endpoints under `/api/profile`, including experience and
//! education entries and the GitHub repository proxy.
//!
//! Every mutating handler loads the caller's profile, checks ownership with
//! `auth::ownership::ensure_owner`, then writes the whole profile back.

pub mod handlers;

pub use handlers::*;
