//! In-memory account store.
//!
//! Used by the test suite and kept as a substitution point for the storage
//! capability; the Postgres store is the production implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use super::{Account, AccountStore, StoreError};

#[derive(Default)]
pub struct MemoryAccounts {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_username: HashMap<String, Account>,
}

impl MemoryAccounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountStore for MemoryAccounts {
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        // Uniqueness check and insert stay under one write lock so concurrent
        // registrations of the same username cannot both succeed.
        let mut inner = self.inner.write().await;
        if inner.by_username.contains_key(username) {
            return Err(StoreError::DuplicateUsername);
        }
        inner.next_id += 1;
        let account = Account {
            id: inner.next_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at_unix: now_unix(),
        };
        inner
            .by_username
            .insert(username.to_string(), account.clone());
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.inner.read().await.by_username.get(username).cloned())
    }
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_insert_fails_without_side_effects() {
        let store = MemoryAccounts::new();
        store
            .create_account("alice", "hash-a")
            .await
            .expect("first insert failed");
        let err = store
            .create_account("alice", "hash-b")
            .await
            .expect_err("duplicate insert succeeded");
        assert!(matches!(err, StoreError::DuplicateUsername));
        assert_eq!(store.len().await, 1);

        let account = store
            .find_by_username("alice")
            .await
            .expect("lookup failed")
            .expect("account missing");
        assert_eq!(account.password_hash, "hash-a");
    }

    #[tokio::test]
    async fn concurrent_duplicate_registrations_resolve_to_one() {
        let store = std::sync::Arc::new(MemoryAccounts::new());

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.create_account("alice", "hash-a").await }
        });
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.create_account("alice", "hash-b").await }
        });

        let results = [
            first.await.expect("task failed"),
            second.await.expect("task failed"),
        ];

        // Exactly one insert wins; the other observes the duplicate.
        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|result| matches!(result, Err(StoreError::DuplicateUsername))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn ids_are_monotonic() {
        let store = MemoryAccounts::new();
        let first = store.create_account("alice", "h").await.expect("insert");
        let second = store.create_account("bob", "h").await.expect("insert");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let store = MemoryAccounts::new();
        store.create_account("Alice", "h").await.expect("insert");
        assert!(store
            .find_by_username("alice")
            .await
            .expect("lookup failed")
            .is_none());
        assert!(store
            .find_by_username("Alice")
            .await
            .expect("lookup failed")
            .is_some());
    }

    #[tokio::test]
    async fn missing_username_is_none() {
        let store = MemoryAccounts::new();
        assert!(store
            .find_by_username("nobody")
            .await
            .expect("lookup failed")
            .is_none());
    }
}
