use crate::error::AppError;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tokio::task;

/// Argon2id password hasher
///
/// Hashing is CPU-bound, so the async methods run it on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
}

impl PasswordHasher {
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Parameters for production use
    pub fn production() -> Self {
        Self::new(19 * 1024, 2, 1)
    }

    /// Cheap parameters for tests and local development
    pub fn development() -> Self {
        Self::new(1024, 1, 1)
    }

    fn argon2(&self) -> Result<Argon2<'static>, AppError> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| AppError::Internal(format!("invalid argon2 parameters: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    pub fn hash_blocking(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Checks a password against a stored PHC hash string
    ///
    /// The parameters embedded in the hash take precedence over this hasher's.
    pub fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("stored password hash is malformed: {e}")))?;
        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let hasher = *self;
        task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?
    }

    pub async fn verify(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = *self;
        task::spawn_blocking(move || hasher.verify_blocking(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::development();
        let hash = hasher.hash_blocking("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_blocking("correct horse", &hash).unwrap());
        assert!(!hasher.verify_blocking("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::development();
        let first = hasher.hash_blocking("same password").unwrap();
        let second = hasher.hash_blocking("same password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = PasswordHasher::development();
        assert!(hasher.verify_blocking("anything", "plaintext").is_err());
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let hasher = PasswordHasher::development();
        let hash = hasher.hash("s3cret-pass".to_string()).await.unwrap();
        assert!(hasher.verify("s3cret-pass".to_string(), hash).await.unwrap());
    }
}
