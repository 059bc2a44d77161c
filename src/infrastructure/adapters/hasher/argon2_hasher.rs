//! Argon2 Password Hasher - argon2 密码哈希实现
//!
//! 实现 PasswordHasherPort trait

use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;

use crate::application::ports::{HasherError, PasswordHasherPort};

/// Argon2 密码哈希器
pub struct Argon2PasswordHasher {
    argon: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash(&self, raw_password: &str) -> Result<String, HasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = self
            .argon
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|e| HasherError::HashError(e.to_string()))?;

        Ok(hashed.to_string())
    }

    fn verify(&self, raw_password: &str, stored_hash: &str) -> Result<bool, HasherError> {
        let parsed =
            PasswordHash::new(stored_hash).map_err(|e| HasherError::HashError(e.to_string()))?;

        Ok(self
            .argon
            .verify_password(raw_password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = Argon2PasswordHasher::new();

        let hash = hasher.hash("pw1").unwrap();
        assert_ne!(hash, "pw1");
        assert!(hasher.verify("pw1", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = Argon2PasswordHasher::new();

        // 每次加盐不同
        let first = hasher.hash("pw1").unwrap();
        let second = hasher.hash("pw1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_corrupt_hash_is_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("pw1", "not a phc string").is_err());
    }
}
