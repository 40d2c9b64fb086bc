//! Ownership policy for user-owned resources.
//!
//! Profiles, posts and comments each record the identity that created them.
//! Only that identity may change or delete them.

use crate::backend::error::ApiError;
use crate::shared::identity::Identity;
use crate::shared::post::{Comment, Post};
use crate::shared::profile::Profile;

/// A resource with a fixed owner
pub trait Owned {
    fn owner(&self) -> &Identity;
}

impl Owned for Profile {
    fn owner(&self) -> &Identity {
        &self.user
    }
}

impl Owned for Post {
    fn owner(&self) -> &Identity {
        &self.user
    }
}

impl Owned for Comment {
    fn owner(&self) -> &Identity {
        &self.user
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Forbidden,
}

/// Decide whether `caller` may mutate `resource`
pub fn authorize(caller: &Identity, resource: &impl Owned) -> Authorization {
    if resource.owner() == caller {
        Authorization::Allowed
    } else {
        Authorization::Forbidden
    }
}

/// [`authorize`], as a handler-friendly `Result`
pub fn ensure_owner(caller: &Identity, resource: &impl Owned) -> Result<(), ApiError> {
    match authorize(caller, resource) {
        Authorization::Allowed => Ok(()),
        Authorization::Forbidden => {
            tracing::warn!("{} attempted to modify a resource owned by {}", caller, resource.owner());
            Err(ApiError::Forbidden)
        }
    }
}
