//! Password value object - salted argon2 hashing of local credentials.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Stored password hash in PHC string format.
///
/// Plaintext never lives inside this type; it is only borrowed while hashing
/// or verifying.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a new plaintext password.
    ///
    /// # Errors
    /// Returns [`DomainError::Password`] if the plaintext is shorter than
    /// [`MIN_PASSWORD_LENGTH`] bytes.
    pub fn new(plain: &[u8]) -> DomainResult<Self> {
        if plain.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = Self::hash(plain)?;
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify plaintext against this hash. Malformed hashes never verify.
    pub fn verify(&self, plain: &[u8]) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Self::argon2().verify_password(plain, &parsed).is_ok()
    }

    fn hash(plain: &[u8]) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain, &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new(b"SecurePassword123!").unwrap();

        assert!(password.verify(b"SecurePassword123!"));
        assert!(!password.verify(b"WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let password = Password::new(b"TestPassword123").unwrap();
        let restored = Password::from_hash(password.as_str());

        assert!(restored.verify(b"TestPassword123"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new(b"SamePassword123").unwrap();
        let pass2 = Password::new(b"SamePassword123").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(b"SamePassword123"));
        assert!(pass2.verify(b"SamePassword123"));
    }

    #[test]
    fn test_password_too_short() {
        let result = Password::new(b"short");
        assert!(matches!(result, Err(DomainError::Password(_))));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let password = Password::from_hash("not-a-phc-string");
        assert!(!password.verify(b"anything"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new(b"12345678").unwrap();
        assert!(!format!("{:?}", password).contains(password.as_str()));
    }
}
