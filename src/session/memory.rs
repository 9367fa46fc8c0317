//! In-process session repository.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use super::{generate_session_token, hash_session_token, SessionRecord, SessionRepository};

/// Default session lifetime: 12 hours.
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

pub struct MemorySessions {
    secret: SecretString,
    ttl_seconds: i64,
    inner: RwLock<HashMap<Vec<u8>, SessionRecord>>,
}

impl MemorySessions {
    #[must_use]
    pub fn new(secret: SecretString, ttl_seconds: i64) -> Self {
        Self {
            secret,
            ttl_seconds,
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn expired(&self, record: &SessionRecord, now: i64) -> bool {
        record.created_at_unix + self.ttl_seconds <= now
    }
}

#[async_trait]
impl SessionRepository for MemorySessions {
    async fn create(&self, user_id: i64, username: &str) -> Result<String> {
        let record = SessionRecord {
            user_id,
            username: username.to_string(),
            created_at_unix: now_unix()?,
        };

        for _ in 0..3 {
            let token = generate_session_token()?;
            let token_hash = hash_session_token(&self.secret, &token)?;
            let mut inner = self.inner.write().await;
            if inner.contains_key(&token_hash) {
                continue;
            }
            inner.insert(token_hash, record.clone());
            return Ok(token);
        }

        Err(anyhow!("failed to generate unique session token"))
    }

    async fn lookup(&self, token: &str) -> Result<Option<SessionRecord>> {
        let token_hash = hash_session_token(&self.secret, token)?;
        let now = now_unix()?;

        let record = self.inner.read().await.get(&token_hash).cloned();
        let Some(record) = record else {
            return Ok(None);
        };

        if self.expired(&record, now) {
            // Lazy expiry; the record is dropped on first access past its TTL.
            self.inner.write().await.remove(&token_hash);
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn destroy(&self, token: &str) -> Result<()> {
        // Idempotent; destroying an absent token is fine.
        let token_hash = hash_session_token(&self.secret, token)?;
        self.inner.write().await.remove(&token_hash);
        Ok(())
    }
}

fn now_unix() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before Unix epoch")?;
    i64::try_from(elapsed.as_secs()).context("system clock out of range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(ttl_seconds: i64) -> MemorySessions {
        MemorySessions::new(SecretString::from("test-secret".to_string()), ttl_seconds)
    }

    #[tokio::test]
    async fn create_then_lookup() {
        let sessions = repo(DEFAULT_SESSION_TTL_SECONDS);
        let token = sessions.create(7, "alice").await.expect("create failed");
        let record = sessions
            .lookup(&token)
            .await
            .expect("lookup failed")
            .expect("session missing");
        assert_eq!(record.user_id, 7);
        assert_eq!(record.username, "alice");
    }

    #[tokio::test]
    async fn unknown_token_is_none() {
        let sessions = repo(DEFAULT_SESSION_TTL_SECONDS);
        assert!(sessions
            .lookup("bm90LWEtcmVhbC10b2tlbg")
            .await
            .expect("lookup failed")
            .is_none());
    }

    #[tokio::test]
    async fn destroy_is_idempotent() {
        let sessions = repo(DEFAULT_SESSION_TTL_SECONDS);
        let token = sessions.create(1, "alice").await.expect("create failed");
        sessions.destroy(&token).await.expect("destroy failed");
        sessions.destroy(&token).await.expect("second destroy failed");
        assert!(sessions
            .lookup(&token)
            .await
            .expect("lookup failed")
            .is_none());
    }

    #[tokio::test]
    async fn sessions_expire() {
        let sessions = repo(0);
        let token = sessions.create(1, "alice").await.expect("create failed");
        assert!(sessions
            .lookup(&token)
            .await
            .expect("lookup failed")
            .is_none());
    }

    #[tokio::test]
    async fn tokens_are_bound_to_the_secret() {
        let sessions = repo(DEFAULT_SESSION_TTL_SECONDS);
        let other = MemorySessions::new(
            SecretString::from("another-secret".to_string()),
            DEFAULT_SESSION_TTL_SECONDS,
        );
        let token = sessions.create(1, "alice").await.expect("create failed");
        assert!(other
            .lookup(&token)
            .await
            .expect("lookup failed")
            .is_none());
    }
}
