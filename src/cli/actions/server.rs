use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::warn;
use url::Url;

use crate::{api, cli::actions::Action, session::generate_session_token};

/// Handle the server action.
///
/// # Errors
/// Returns an error if the session secret is missing outside `--dev`, the
/// DSN is invalid, or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    let Action::Server {
        port,
        dsn,
        session_secret,
        dev,
        session_ttl_seconds,
        cookie_secure,
    } = action;

    Url::parse(&dsn).context("invalid --dsn")?;

    let session_secret = match session_secret {
        Some(secret) => secret,
        None if dev => {
            // Ephemeral secret; sessions do not survive a restart.
            warn!("No session secret provided, generating an ephemeral one (--dev)");
            SecretString::from(generate_session_token()?)
        }
        None => anyhow::bail!("missing required argument: --session-secret"),
    };

    let config = api::ApiConfig {
        session_ttl_seconds,
        cookie_secure,
    };

    api::new(port, dsn, session_secret, config).await
}
