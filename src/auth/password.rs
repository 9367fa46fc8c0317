//! Password hashing with bcrypt.

use anyhow::{Context, Result};

/// bcrypt work factor used for new accounts.
pub const HASH_COST: u32 = 12;

/// Hash a plaintext password with bcrypt at [`HASH_COST`].
///
/// bcrypt is deliberately slow; it runs on the blocking thread pool so a
/// registration in flight never serializes unrelated requests.
pub async fn hash(password: &str) -> Result<String> {
    hash_with_cost(password.to_string(), HASH_COST).await
}

pub(crate) async fn hash_with_cost(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("password hashing task failed")?
        .context("failed to hash password")
}

/// Verify a plaintext password against a stored bcrypt hash.
pub async fn verify(password: &str, password_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .context("password verification task failed")?
        .context("failed to verify password")
}
