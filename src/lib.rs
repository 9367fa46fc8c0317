//! # Pordisto
//!
//! `pordisto` is a minimal username/password authentication service. It
//! registers accounts, verifies credentials, and maintains server-side
//! sessions that gate access to a protected page.
//!
//! ## Accounts
//!
//! Accounts are `(username, password_hash)` pairs stored in Postgres with a
//! unique index on `username`. Passwords are hashed with bcrypt (cost 12)
//! and the plaintext never reaches storage. Accounts are only created via
//! registration; there is no update or delete path.
//!
//! ## Sessions
//!
//! A successful registration or login issues an opaque random token, carried
//! to the client as an `HttpOnly`/`SameSite=Lax` cookie. Only a keyed hash of
//! the token is kept server-side, in an injected [`session::SessionRepository`]
//! so the in-process map can be swapped for a distributed cache without
//! touching the gateway contract.
//!
//! Unknown usernames and wrong passwords produce identical responses to
//! prevent account enumeration.

pub mod api;
pub mod auth;
pub mod cli;
pub mod session;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
