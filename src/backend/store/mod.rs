//! Document Store
//!
//! Persistence for users, profiles and posts behind one async trait, so the
//! handlers run unchanged against PostgreSQL in production and an in-memory
//! map in tests or when no database is configured.
//!
//! "Not found" is always `Ok(None)` (or `Ok(false)` for deletes), never an
//! error. Writes are whole-document upserts; concurrent read-modify-write of
//! the same document is last-write-wins.

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::identity::Identity;
use crate::shared::post::Post;
use crate::shared::profile::Profile;
use crate::shared::user::User;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique key is already taken
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl std::fmt::Debug for dyn Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Store")
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new user; fails with `Conflict` when the email is taken
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    /// Look up a user by normalized email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: &Identity) -> Result<Option<User>, StoreError>;

    async fn find_profile_by_user(&self, user: &Identity) -> Result<Option<Profile>, StoreError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// Insert or replace the profile of `profile.user`
    async fn save_profile(&self, profile: Profile) -> Result<Profile, StoreError>;

    /// Insert or replace a post by id
    async fn save_post(&self, post: Post) -> Result<Post, StoreError>;

    /// All posts, newest first
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn find_post(&self, id: &str) -> Result<Option<Post>, StoreError>;

    async fn delete_post(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove `user` together with their profile and every post they wrote,
    /// all or nothing. Returns how many posts were removed.
    async fn delete_account(&self, user: &Identity) -> Result<u64, StoreError>;
}
