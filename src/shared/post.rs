/**
 * Post Types
 *
 * Posts, their likes and comments. Posts and comments are owned resources:
 * the `user` field records the author and only the author may delete them.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::identity::Identity;
use crate::shared::user::User;
use crate::shared::validation::{FieldError, Validator};

/// Stored post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// Author; set at creation and never reassigned
    pub user: Identity,
    pub text: String,
    /// Author's display name at posting time
    pub name: String,
    pub avatar: String,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn new(author: &User, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user: author.id.clone(),
            text: text.into(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        }
    }

    pub fn is_liked_by(&self, user: &Identity) -> bool {
        self.likes.iter().any(|like| &like.user == user)
    }

    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

/// A single like; one per user per post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub user: Identity,
}

/// Comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Author; set at creation and never reassigned
    pub user: Identity,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: &User, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user: author.id.clone(),
            text: text.into(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            date: Utc::now(),
        }
    }
}

/// Body of create-post and add-comment requests
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl TextRequest {
    /// Validate and return the trimmed text
    pub fn into_text(self) -> Result<String, Vec<FieldError>> {
        let mut v = Validator::new();
        v.required("text", self.text.as_deref(), "Text is required");
        v.finish()?;
        Ok(self.text.unwrap_or_default().trim().to_string())
    }
}
