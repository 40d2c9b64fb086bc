/**
 * User Types
 *
 * The stored user record, its public projection, and the request/response
 * bodies of the registration and login endpoints.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::shared::identity::Identity;
use crate::shared::validation::{FieldError, Validator};

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Stored user record
///
/// Holds the bcrypt hash of the user's password. This type is never
/// serialized into a response; use [`PublicUser`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Identity,
    pub name: String,
    /// Lower-cased, trimmed email; the login key
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            date: self.date,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// User information safe to return to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Identity,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// Name and avatar embedded in profile listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Identity,
    pub name: String,
    pub avatar: String,
}

/// Registration request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.required("name", self.name.as_deref(), "Name is required")
            .email("email", self.email.as_deref(), "Please include a valid email")
            .min_len(
                "password",
                self.password.as_deref(),
                MIN_PASSWORD_LEN,
                "Please enter a password with 6 or more characters",
            );
        v.finish()
    }
}

/// Login request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.email("email", self.email.as_deref(), "Please include a valid email");
        if self.password.is_none() {
            v.push("password", "Password is required");
        }
        v.finish()
    }
}

/// Token returned by registration and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Canonical form of an email used as the credential lookup key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Gravatar URL for an email (SHA-256 form, 200px, PG rated, mystery-man fallback)
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(normalize_email(email).as_bytes());
    format!("https://www.gravatar.com/avatar/{digest:x}?s=200&r=pg&d=mm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation_reports_all_fields() {
        let errors = RegisterRequest::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[test]
    fn test_login_password_only_needs_to_exist() {
        let request = LoginRequest {
            email: Some("a@b.com".into()),
            password: Some(String::new()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_gravatar_is_case_insensitive() {
        assert_eq!(gravatar_url(" Ada@Example.com"), gravatar_url("ada@example.com"));
        assert!(gravatar_url("ada@example.com").starts_with("https://www.gravatar.com/avatar/"));
    }

    #[test]
    fn test_public_projection_has_no_hash() {
        let user = User {
            id: Identity::new("u1"),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$2b$04$hash".into(),
            avatar: String::new(),
            date: Utc::now(),
        };
        let json = serde_json::to_value(user.public()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["id"], "u1");
    }
}
