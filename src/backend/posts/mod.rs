//! Posts Module
//!
//! Post, like and comment endpoints under `/api/posts`. All routes require
//! authentication; deleting a post or comment additionally requires owning it.

pub mod handlers;

pub use handlers::*;
