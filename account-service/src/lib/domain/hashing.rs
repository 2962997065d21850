//! Password hashing off the async executor.
//!
//! Argon2 is CPU-bound, so both operations run on the blocking thread pool.

use auth::PasswordError;
use auth::PasswordHasher;
use thiserror::Error;
use tokio::task;

#[derive(Debug, Clone, Error)]
pub enum HashingError {
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Hashing task did not complete: {0}")]
    TaskFailed(String),
}

/// Hash a password on the blocking thread pool.
///
/// # Errors
/// * `Password` - The hasher rejected the input or failed
/// * `TaskFailed` - The blocking task panicked or was cancelled
pub async fn hash_password(hasher: PasswordHasher, password: String) -> Result<String, HashingError> {
    task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| HashingError::TaskFailed(e.to_string()))?
        .map_err(HashingError::from)
}

/// Verify a password against a stored digest on the blocking thread pool.
///
/// # Errors
/// * `Password` - The stored digest is malformed
/// * `TaskFailed` - The blocking task panicked or was cancelled
pub async fn verify_password(
    hasher: PasswordHasher,
    password: String,
    digest: String,
) -> Result<bool, HashingError> {
    task::spawn_blocking(move || hasher.verify(&password, &digest))
        .await
        .map_err(|e| HashingError::TaskFailed(e.to_string()))?
        .map_err(HashingError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify_off_executor() {
        let hasher = PasswordHasher::new();

        let digest = hash_password(hasher, "correcthorse1".to_string())
            .await
            .unwrap();

        assert!(verify_password(hasher, "correcthorse1".to_string(), digest.clone())
            .await
            .unwrap());
        assert!(!verify_password(hasher, "wrongpass1".to_string(), digest)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_verify_malformed_digest_is_error() {
        let result = verify_password(
            PasswordHasher::new(),
            "correcthorse1".to_string(),
            "not-a-phc-string".to_string(),
        )
        .await;

        assert!(matches!(result, Err(HashingError::Password(_))));
    }
}
