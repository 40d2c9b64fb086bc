/**
 * Credential Verification
 *
 * bcrypt hashing and comparison of user passwords.
 *
 * A login for an unknown email still performs one bcrypt comparison, against
 * a dummy hash of the configured cost, so response times do not reveal which
 * emails are registered.
 */
use std::sync::Arc;
use thiserror::Error;

const DUMMY_PASSWORD: &str = "devconnect-dummy-password";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("password task failed: {0}")]
    Task(String),
}

/// Hashes passwords and checks login attempts
#[derive(Debug)]
pub struct CredentialVerifier {
    cost: u32,
    /// Built up front so no login ever pays for hashing it
    dummy_hash: String,
}

impl CredentialVerifier {
    pub fn new(cost: u32) -> Result<Self, CredentialError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Whether `plaintext` matches `stored_hash`
    ///
    /// An unparseable hash is a mismatch, not an error.
    pub fn matches(&self, plaintext: &str, stored_hash: &str) -> bool {
        match bcrypt::verify(plaintext, stored_hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!("Stored password hash could not be checked: {}", e);
                false
            }
        }
    }

    /// Check a login attempt against the stored hash, if the user exists
    ///
    /// Always performs exactly one bcrypt comparison.
    pub fn verify_login(&self, plaintext: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => self.matches(plaintext, hash),
            None => {
                let _ = self.matches(plaintext, &self.dummy_hash);
                false
            }
        }
    }
}

/// Hash `plaintext` on the blocking thread pool
pub async fn hash_password(
    verifier: Arc<CredentialVerifier>,
    plaintext: String,
) -> Result<String, CredentialError> {
    tokio::task::spawn_blocking(move || verifier.hash(&plaintext))
        .await
        .map_err(|e| CredentialError::Task(e.to_string()))?
}

/// Run [`CredentialVerifier::verify_login`] on the blocking thread pool
pub async fn verify_login(
    verifier: Arc<CredentialVerifier>,
    plaintext: String,
    stored_hash: Option<String>,
) -> Result<bool, CredentialError> {
    tokio::task::spawn_blocking(move || verifier.verify_login(&plaintext, stored_hash.as_deref()))
        .await
        .map_err(|e| CredentialError::Task(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> CredentialVerifier {
        CredentialVerifier::new(4).unwrap()
    }

    #[test]
    fn test_hash_and_match() {
        let verifier = verifier();
        let hash = verifier.hash("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verifier.matches("hunter22", &hash));
        assert!(!verifier.matches("hunter23", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let verifier = verifier();
        let a = verifier.hash("same").unwrap();
        let b = verifier.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(verifier.matches("same", &a));
        assert!(verifier.matches("same", &b));
    }

    #[test]
    fn test_unparseable_hash_is_mismatch() {
        assert!(!verifier().matches("anything", "not-a-bcrypt-hash"));
        assert!(!verifier().matches("anything", ""));
    }

    #[test]
    fn test_verify_login_unknown_user() {
        let verifier = verifier();
        assert!(!verifier.verify_login("password", None));
        assert!(!verifier.verify_login(DUMMY_PASSWORD, None));
    }

    #[test]
    fn test_dummy_hash_ready_before_first_login() {
        let verifier = verifier();
        let before = verifier.dummy_hash.clone();
        assert!(before.starts_with("$2b$04$"));

        assert!(!verifier.verify_login("password", None));
        assert!(!verifier.verify_login("password", None));
        assert_eq!(verifier.dummy_hash, before);
    }

    #[test]
    fn test_dummy_hash_uses_configured_cost() {
        let verifier = CredentialVerifier::new(5).unwrap();
        assert_eq!(verifier.cost(), 5);
        assert!(verifier.dummy_hash.starts_with("$2b$05$"));
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        assert!(CredentialVerifier::new(3).is_err());
    }

    #[test]
    fn test_verify_login_known_user() {
        let verifier = verifier();
        let hash = verifier.hash("password").unwrap();
        assert!(verifier.verify_login("password", Some(&hash)));
        assert!(!verifier.verify_login("wrong", Some(&hash)));
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let verifier = Arc::new(verifier());
        let hash = hash_password(verifier.clone(), "secret1".into()).await.unwrap();
        assert!(verify_login(verifier.clone(), "secret1".into(), Some(hash)).await.unwrap());
        assert!(!verify_login(verifier, "secret1".into(), None).await.unwrap());
    }
}
