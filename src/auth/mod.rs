//! Session Gateway: the transport-agnostic credential-and-session core.
//!
//! The gateway validates input, hashes/verifies passwords, and establishes or
//! destroys sessions against injected [`AccountStore`] and
//! [`SessionRepository`] capabilities. Cookie mechanics live in the HTTP
//! boundary, not here.

pub mod password;

use std::sync::Arc;
use thiserror::Error;

use crate::session::SessionRepository;
use crate::store::{AccountStore, StoreError};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Failure kinds surfaced by the gateway.
///
/// Lookup-miss and hash-mismatch collapse into [`AuthError::InvalidCredentials`]
/// so the two paths are indistinguishable to the outside observer.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("username already exists")]
    DuplicateUsername,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => Self::DuplicateUsername,
            StoreError::Storage(err) => Self::Storage(err),
        }
    }
}

/// The authenticated identity bound to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// Result of establishing a session: the raw token plus who it belongs to.
#[derive(Debug)]
pub struct NewSession {
    pub token: String,
    pub identity: Identity,
}

/// Access decision for a protected resource. Deny is a routing decision,
/// not a fault.
#[derive(Debug)]
pub enum Access {
    Granted(Identity),
    RedirectToLogin,
}

pub struct Gateway {
    accounts: Arc<dyn AccountStore>,
    sessions: Arc<dyn SessionRepository>,
}

impl Gateway {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountStore>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { accounts, sessions }
    }

    /// Register a new account and establish a session for it.
    ///
    /// Registration implicitly authenticates; there is no separate
    /// confirmation step.
    ///
    /// # Errors
    /// `Validation` when a length constraint fails (no account is created),
    /// `DuplicateUsername` when the name is taken, `Storage` otherwise.
    pub async fn register(&self, username: &str, password: &str) -> Result<NewSession, AuthError> {
        let username = username.trim();
        if username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(AuthError::Validation(format!(
                "Username must be at least {MIN_USERNAME_LENGTH} characters."
            )));
        }
        // Checked on the raw password, before hashing.
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            )));
        }

        let password_hash = password::hash(password).await?;
        let account = self.accounts.create_account(username, &password_hash).await?;

        self.establish(account.id, &account.username).await
    }

    /// Verify credentials and establish a session.
    ///
    /// # Errors
    /// Empty fields, unknown usernames, and wrong passwords all return
    /// `InvalidCredentials`; `Storage` covers persistence faults.
    pub async fn login(&self, username: &str, password: &str) -> Result<NewSession, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let Some(account) = self.accounts.find_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify(password, &account.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        self.establish(account.id, &account.username).await
    }

    /// Destroy the session for a token. Idempotent; an absent or
    /// already-destroyed token is not an error.
    ///
    /// # Errors
    /// `Storage` when the repository fails.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.destroy(token).await.map_err(AuthError::Storage)
    }

    /// Resolve the identity behind a token, if any. Pure read; the absence
    /// of a valid session is a normal outcome, not an error.
    ///
    /// # Errors
    /// `Storage` when the repository fails.
    pub async fn identity(&self, token: Option<&str>) -> Result<Option<Identity>, AuthError> {
        let Some(token) = token else {
            return Ok(None);
        };
        let record = self.sessions.lookup(token).await.map_err(AuthError::Storage)?;
        Ok(record.map(|record| Identity {
            user_id: record.user_id,
            username: record.username,
        }))
    }

    /// Gate for protected resources. No state mutation.
    ///
    /// # Errors
    /// `Storage` when the repository fails.
    pub async fn require_session(&self, token: Option<&str>) -> Result<Access, AuthError> {
        Ok(match self.identity(token).await? {
            Some(identity) => Access::Granted(identity),
            None => Access::RedirectToLogin,
        })
    }

    async fn establish(&self, user_id: i64, username: &str) -> Result<NewSession, AuthError> {
        let token = self
            .sessions
            .create(user_id, username)
            .await
            .map_err(AuthError::Storage)?;
        Ok(NewSession {
            token,
            identity: Identity {
                user_id,
                username: username.to_string(),
            },
        })
    }
}
