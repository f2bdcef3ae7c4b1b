/// Password hashing and verification with Argon2id
///
/// Hashes are PHC strings (`$argon2id$v=19$m=...`) with a random salt, so the
/// cost parameters travel with each hash and verification keeps working
/// after the configured policy changes.

use crate::config::PasswordPolicy;
use crate::error::{CrowdfundError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Hashes and checks passwords
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Build a hasher from the configured cost parameters
    pub fn new(policy: &PasswordPolicy) -> Result<Self> {
        let params = Params::new(policy.memory_kib, policy.iterations, policy.parallelism, None)
            .map_err(|e| CrowdfundError::Config(format!("password_policy: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Cheapest parameters argon2 allows. Tests only.
    #[cfg(test)]
    pub fn new_test() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .expect("minimum argon2 params are valid");

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash a password with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CrowdfundError::PasswordHash(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Check a password against a stored hash
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Unreadable password hash: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new_test();

        let hash = hasher.hash("pw1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("pw1"));

        assert!(hasher.verify("pw1", &hash));
        assert!(!hasher.verify("pw2", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new_test();

        let a = hasher.hash("same").unwrap();
        let b = hasher.hash("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        let hasher = PasswordHasher::new_test();
        assert!(!hasher.verify("pw1", "pw1"));
        assert!(!hasher.verify("pw1", ""));
    }

    #[test]
    fn test_policy_validation() {
        let policy = PasswordPolicy {
            memory_kib: 8,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            PasswordHasher::new(&policy),
            Err(CrowdfundError::Config(_))
        ));
    }
}
