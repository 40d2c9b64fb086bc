//! Request validation
//!
//! Handlers validate every field of a request before touching the store and
//! report all violations together, so a client can render each message next
//! to its field in one round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted for experience/education ranges
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending request field, absent for request-level failures such as
    /// rejected credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            msg: msg.into(),
        }
    }

    /// A failure not tied to one field
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            field: None,
            msg: msg.into(),
        }
    }
}

/// Accumulates field errors across a request
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and not blank
    pub fn required(&mut self, field: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if value.map(str::trim).unwrap_or_default().is_empty() {
            self.push(field, msg);
        }
        self
    }

    /// Field must be a plausible email address
    pub fn email(&mut self, field: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if !value.is_some_and(is_valid_email) {
            self.push(field, msg);
        }
        self
    }

    /// Field must be at least `min` characters long
    pub fn min_len(&mut self, field: &str, value: Option<&str>, min: usize, msg: &str) -> &mut Self {
        if value.map(|v| v.chars().count()).unwrap_or_default() < min {
            self.push(field, msg);
        }
        self
    }

    /// Field, when present and non-blank, must be a `YYYY-MM-DD` date
    pub fn date(&mut self, field: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) {
            if parse_date(raw).is_none() {
                self.push(field, msg);
            }
        }
        self
    }

    pub fn push(&mut self, field: &str, msg: &str) {
        self.errors.push(FieldError::new(field, msg));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the validator, returning every collected error
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Basic structural email check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Return the trimmed value if it has any content
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
