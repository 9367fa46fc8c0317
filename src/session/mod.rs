//! Session repository capability and token helpers.
//!
//! Sessions are keyed by an opaque unguessable token. The raw token only
//! travels in the cookie; repositories store an HMAC-SHA256 keyed hash under
//! the operator-supplied session secret.

pub mod memory;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

pub use memory::MemorySessions;

/// Data held server-side for a live session.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user_id: i64,
    pub username: String,
    pub created_at_unix: i64,
}

/// Injected session storage capability: create, read, and destroy by token.
///
/// Consistency per token is last write wins; each token is effectively owned
/// by one client at a time.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a session and return the raw token for the cookie.
    async fn create(&self, user_id: i64, username: &str) -> Result<String>;

    /// Resolve a raw token into a live session, if any.
    async fn lookup(&self, token: &str) -> Result<Option<SessionRecord>>;

    /// Destroy the session for a token. Idempotent.
    async fn destroy(&self, token: &str) -> Result<()>;
}

/// Create a new session token.
/// The raw value is only returned to set the cookie; repositories store a hash.
pub fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Keyed hash of a session token under the signing secret.
/// Raw tokens never touch the repository; lookups hash the cookie value.
pub fn hash_session_token(secret: &SecretString, token: &str) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.expose_secret().as_bytes())
        .context("invalid session secret")?;
    mac.update(token.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn generate_session_token_round_trip() {
        let decoded_len = generate_session_token()
            .ok()
            .and_then(|token| URL_SAFE_NO_PAD.decode(token.as_bytes()).ok())
            .map(|bytes| bytes.len());
        assert_eq!(decoded_len, Some(32));
    }

    #[test]
    fn tokens_are_unique() {
        let first = generate_session_token().expect("token generation failed");
        let second = generate_session_token().expect("token generation failed");
        assert_ne!(first, second);
    }

    #[test]
    fn hash_session_token_stable() {
        let key = secret("signing-secret");
        let first = hash_session_token(&key, "token").expect("hashing failed");
        let second = hash_session_token(&key, "token").expect("hashing failed");
        let different = hash_session_token(&key, "other").expect("hashing failed");
        assert_eq!(first, second);
        assert_ne!(first, different);
    }

    #[test]
    fn hash_depends_on_secret() {
        let first = hash_session_token(&secret("one"), "token").expect("hashing failed");
        let second = hash_session_token(&secret("two"), "token").expect("hashing failed");
        assert_ne!(first, second);
    }
}
