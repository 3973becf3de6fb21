//! Password hashing capability.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use super::RegistrationFailure;

/// One-way salted password hashing with a verify counterpart.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationFailure::PasswordHash` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, RegistrationFailure>;

    /// Whether `password` matches a hash produced by [`Self::hash`].
    ///
    /// A malformed hash never matches.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id with the crate's default (fixed) parameters.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, RegistrationFailure> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| RegistrationFailure::PasswordHash)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext_and_verifies() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("pedal-power").unwrap();

        assert_ne!(hash, "pedal-power");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("pedal-power", &hash));
        assert!(!hasher.verify("pedal-powder", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = Argon2Hasher::new();
        let first = hasher.hash("same-password").unwrap();
        let second = hasher.hash("same-password").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = Argon2Hasher::new();
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", ""));
    }
}
