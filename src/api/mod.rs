//! HTTP boundary: router, middleware, and server lifecycle.
//!
//! Cookie and status-code mechanics live here; the credential/session
//! contract itself is in [`crate::auth`].

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Extension, Router,
};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::handlers::{dashboard, health, login, register, session},
    auth::Gateway,
    session::MemorySessions,
    store::{postgres::ensure_schema, PgAccountStore},
};

pub mod handlers;
mod openapi;

pub use openapi::ApiDoc;

/// Boundary configuration for sessions and cookies.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
}

/// Shared state injected into handlers.
#[derive(Clone)]
pub struct ApiState {
    pub gateway: Arc<Gateway>,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
}

/// Build the application router for the given state.
#[must_use]
pub fn app(state: ApiState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/register", post(register::register))
        .route("/login", post(login::login))
        .route("/logout", post(session::logout))
        .route("/me", get(session::me))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/health", get(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the server.
///
/// # Errors
/// Returns an error if the database is unreachable, the schema cannot be
/// bootstrapped, or the listener fails to bind.
pub async fn new(
    port: u16,
    dsn: String,
    session_secret: SecretString,
    config: ApiConfig,
) -> Result<()> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    ensure_schema(&pool).await?;

    let accounts: Arc<PgAccountStore> = Arc::new(PgAccountStore::new(pool));
    let sessions: Arc<MemorySessions> = Arc::new(MemorySessions::new(
        session_secret,
        config.session_ttl_seconds,
    ));
    let gateway = Arc::new(Gateway::new(accounts, sessions));

    let app = app(ApiState {
        gateway,
        session_ttl_seconds: config.session_ttl_seconds,
        cookie_secure: config.cookie_secure,
    });

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
