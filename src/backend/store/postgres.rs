/**
 * PostgreSQL Store
 *
 * Users live in a regular table. Profiles and posts are stored as JSONB
 * documents with their owner and date pulled out into indexed columns, so
 * nested experience, education, likes and comments are read and written as
 * one unit.
 *
 * Schema: `migrations/0001_init.sql`.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use std::time::Duration;

use super::{Store, StoreError};
use crate::shared::identity::Identity;
use crate::shared::post::Post;
use crate::shared::profile::Profile;
use crate::shared::user::User;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    avatar: String,
    date: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: Identity::new(row.id),
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            avatar: row.avatar,
            date: row.date,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, password_hash, avatar, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, avatar, date
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .bind(user.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict(format!("email {} already registered", user.email))
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, avatar, date
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_user_by_id(&self, id: &Identity) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, avatar, date
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_profile_by_user(&self, user: &Identity) -> Result<Option<Profile>, StoreError> {
        let doc = sqlx::query_scalar::<_, Json<Profile>>("SELECT doc FROM profiles WHERE user_id = $1")
            .bind(user.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc.map(|Json(profile)| profile))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let docs = sqlx::query_scalar::<_, Json<Profile>>("SELECT doc FROM profiles ORDER BY date ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(docs.into_iter().map(|Json(profile)| profile).collect())
    }

    async fn save_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        let doc = serde_json::to_value(&profile)?;
        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, date, doc)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET doc = EXCLUDED.doc
            "#,
        )
        .bind(&profile.id)
        .bind(profile.user.as_str())
        .bind(profile.date)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn save_post(&self, post: Post) -> Result<Post, StoreError> {
        let doc = serde_json::to_value(&post)?;
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, date, doc)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc
            "#,
        )
        .bind(&post.id)
        .bind(post.user.as_str())
        .bind(post.date)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let docs = sqlx::query_scalar::<_, Json<Post>>("SELECT doc FROM posts ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(docs.into_iter().map(|Json(post)| post).collect())
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let doc = sqlx::query_scalar::<_, Json<Post>>("SELECT doc FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc.map(|Json(post)| post))
    }

    async fn delete_post(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_account(&self, user: &Identity) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let posts = sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user.as_str())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user.as_str())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(posts.rows_affected())
    }
}
