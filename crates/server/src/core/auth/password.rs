//! Password hashing
//!
//! bcrypt is deliberately slow, so both directions run on the blocking pool.

use crate::core::error::{Error, Result};
use bcrypt::{non_truncating_hash, non_truncating_verify, DEFAULT_COST};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Cheapest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Most expensive work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;
/// bcrypt only looks at this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash compared against when the login is unknown, so both failure paths pay for bcrypt.
    dummy_hash: Arc<OnceCell<String>>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Fails with `BadRequest` for passwords longer than [`MAX_PASSWORD_BYTES`].
    pub async fn hash(&self, password: &str) -> Result<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(Error::BadRequest(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || non_truncating_hash(password, cost))
            .await
            .map_err(|e| Error::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))
    }

    /// `Ok(false)` on mismatch; `Err` only if `stored_hash` is unreadable.
    pub async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool> {
        // Nothing this long can have been registered.
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || non_truncating_verify(password, &stored_hash))
            .await
            .map_err(|e| Error::Internal(format!("Verify task failed: {}", e)))?
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))
    }

    /// Spend the same bcrypt work as [`PasswordHasher::verify`] for a login
    /// that does not exist. Always `Ok(false)`.
    pub async fn verify_unknown(&self, password: &str) -> Result<bool> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hash("not-a-real-password"))
            .await?;
        self.verify(password, dummy).await?;
        Ok(false)
    }
}
