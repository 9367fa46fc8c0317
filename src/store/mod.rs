//! Account storage capability.
//!
//! Stores hold `(username, password_hash)` pairs with a uniqueness invariant
//! on username enforced at the store level: a duplicate insert fails
//! atomically with no partial effects. No update or delete operations exist.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryAccounts;
pub use postgres::PgAccountStore;

/// Persisted identity record.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at_unix: i64,
}

/// Failure kinds surfaced by account stores.
///
/// Duplicate usernames are a structured kind so callers map them to conflict
/// semantics without inspecting error text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already exists")]
    DuplicateUsername,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Fails with [`StoreError::DuplicateUsername`]
    /// when the username is taken; nothing is written in that case.
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError>;

    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;
}
