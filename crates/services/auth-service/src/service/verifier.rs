//! Local password verification.

use domain::Password;

/// Checks plaintext against a stored password hash.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, secret: &[u8], password_hash: &str) -> bool;
}

/// Verifies argon2 PHC hashes via the domain [`Password`] value object.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordHashVerifier;

impl CredentialVerifier for PasswordHashVerifier {
    fn verify(&self, secret: &[u8], password_hash: &str) -> bool {
        Password::from_hash(password_hash).verify(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifies_matching_hash() {
        let hash = Password::new(b"Correct-Horse-1").unwrap().into_string();

        assert!(PasswordHashVerifier.verify(b"Correct-Horse-1", &hash));
        assert!(!PasswordHashVerifier.verify(b"correct-horse-1", &hash));
    }

    #[test]
    fn test_rejects_malformed_hash() {
        assert!(!PasswordHashVerifier.verify(b"anything", ""));
    }
}
