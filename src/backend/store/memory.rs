/**
 * In-Memory Store
 *
 * `HashMap`s behind a tokio `RwLock`. Used by the test suite and whenever no
 * `DATABASE_URL` is configured. Contents are lost on restart.
 */
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::shared::identity::Identity;
use crate::shared::post::Post;
use crate::shared::profile::Profile;
use crate::shared::user::User;

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Identity, User>,
    /// Keyed by owner; one profile per user
    profiles: HashMap<Identity, Profile>,
    posts: HashMap<String, Post>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!("email {} already registered", user.email)));
        }
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &Identity) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn find_profile_by_user(&self, user: &Identity) -> Result<Option<Profile>, StoreError> {
        Ok(self.inner.read().await.profiles.get(user).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let mut profiles: Vec<Profile> = self.inner.read().await.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(profiles)
    }

    async fn save_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        self.inner
            .write()
            .await
            .profiles
            .insert(profile.user.clone(), profile.clone());
        Ok(profile)
    }

    async fn save_post(&self, post: Post) -> Result<Post, StoreError> {
        self.inner.write().await.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self.inner.read().await.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.inner.read().await.posts.get(id).cloned())
    }

    async fn delete_post(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.posts.remove(id).is_some())
    }

    async fn delete_account(&self, user: &Identity) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|_, post| &post.user != user);
        inner.profiles.remove(user);
        inner.users.remove(user);
        Ok((before - inner.posts.len()) as u64)
    }
}
