//! Password hashing and verification.
//!
//! Digests are bcrypt (`$2b$`), self-describing and salted. The work cost is
//! fixed when the hasher is built; callers cannot change it per call.

use thiserror::Error;
use tokio::task;

/// bcrypt only reads this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Cost used by the server. Rows written by the previous admin service use
/// cost 10 too, so the dummy verification costs the same as a real one.
pub const DEFAULT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum HashingError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] task::JoinError),
}

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    // Verified against when the account does not exist, so unknown emails
    // cost the same as a wrong password.
    dummy_digest: String,
}

impl PasswordHasher {
    /// Build a hasher with the given bcrypt cost.
    ///
    /// # Errors
    /// Returns an error if the cost is out of range or the entropy source fails.
    pub fn new(cost: u32) -> Result<Self, HashingError> {
        let dummy_digest = bcrypt::hash("admin-auth-dummy-password", cost)?;
        Ok(Self { cost, dummy_digest })
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// # Errors
    /// Returns an error only on internal failure (bad cost, no entropy, panicked task).
    pub async fn hash(&self, plaintext: &str) -> Result<String, HashingError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let digest = task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(digest)
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// Malformed digests, oversized passwords and internal failures all read
    /// as a mismatch.
    pub async fn verify(&self, digest: &str, plaintext: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            // still pay for one bcrypt round so the rejection isn't instant
            self.burn(plaintext).await;
            return false;
        }

        let digest = digest.to_owned();
        let plaintext = plaintext.to_owned();
        task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
            .await
            .ok()
            .and_then(Result::ok)
            .unwrap_or(false)
    }

    /// Run a verification against the dummy digest and discard the result.
    pub async fn burn(&self, plaintext: &str) {
        let digest = self.dummy_digest.clone();
        let plaintext: Vec<u8> = plaintext
            .as_bytes()
            .iter()
            .take(MAX_PASSWORD_BYTES)
            .copied()
            .collect();
        let _ = task::spawn_blocking(move || bcrypt::verify(plaintext, &digest)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    const TEST_COST: u32 = 4;

    fn hasher() -> Result<PasswordHasher> {
        Ok(PasswordHasher::new(TEST_COST)?)
    }

    #[tokio::test]
    async fn hash_then_verify() -> Result<()> {
        let hasher = hasher()?;
        let digest = hasher.hash("hunter2").await?;

        assert!(digest.starts_with("$2"));
        assert_ne!(digest, "hunter2");
        assert!(hasher.verify(&digest, "hunter2").await);
        assert!(!hasher.verify(&digest, "hunter2x").await);
        Ok(())
    }

    #[tokio::test]
    async fn hash_is_salted() -> Result<()> {
        let hasher = hasher()?;
        let first = hasher.hash("same").await?;
        let second = hasher.hash("same").await?;

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "same").await);
        assert!(hasher.verify(&second, "same").await);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_digest_is_a_mismatch() -> Result<()> {
        let hasher = hasher()?;
        assert!(!hasher.verify("", "hunter2").await);
        assert!(!hasher.verify("not-a-bcrypt-hash", "hunter2").await);
        assert!(!hasher.verify("$2b$04$short", "hunter2").await);
        Ok(())
    }

    #[tokio::test]
    async fn oversized_password_never_verifies() -> Result<()> {
        let hasher = hasher()?;
        let base = "a".repeat(MAX_PASSWORD_BYTES);
        let digest = hasher.hash(&base).await?;

        assert!(hasher.verify(&digest, &base).await);
        assert!(!hasher.verify(&digest, &format!("{base}b")).await);
        Ok(())
    }

    #[tokio::test]
    async fn digest_embeds_cost() -> Result<()> {
        let hasher = hasher()?;
        let digest = hasher.hash("hunter2").await?;
        assert_eq!(hasher.cost(), TEST_COST);
        assert!(digest.contains("$04$"));
        Ok(())
    }

    #[test]
    fn rejects_invalid_cost() {
        assert!(PasswordHasher::new(1).is_err());
    }

    #[test]
    fn default_cost_matches_existing_rows() {
        assert_eq!(DEFAULT_COST, 10);
    }

    #[test]
    fn dummy_digest_uses_configured_cost() -> Result<()> {
        let hasher = PasswordHasher::new(DEFAULT_COST)?;
        assert!(hasher.dummy_digest.starts_with("$2b$10$"));

        let legacy = bcrypt::hash("hunter2", 10)?;
        assert_eq!(hasher.dummy_digest[..7], legacy[..7]);
        Ok(())
    }
}
