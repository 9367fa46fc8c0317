//! Session cookie handling, identity check, and logout.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use tracing::error;

use super::types::{AuthOk, ErrorResponse, MeResponse, MeUser};
use crate::api::ApiState;

pub(crate) const SESSION_COOKIE_NAME: &str = "pordisto_session";

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Authenticated; includes the session's user", body = MeResponse),
        (status = 401, description = "No active session", body = MeResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn me(headers: HeaderMap, state: Extension<ApiState>) -> impl IntoResponse {
    let token = extract_session_token(&headers);
    match state.gateway.identity(token.as_deref()).await {
        Ok(Some(identity)) => (
            StatusCode::OK,
            Json(MeResponse {
                authenticated: true,
                user: Some(MeUser {
                    id: identity.user_id,
                    username: identity.username,
                }),
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(MeResponse {
                authenticated: false,
                user: None,
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to resolve session: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Server error.".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session cleared; idempotent", body = AuthOk),
    ),
    tag = "auth"
)]
pub async fn logout(headers: HeaderMap, state: Extension<ApiState>) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        if let Err(err) = state.gateway.logout(&token).await {
            error!("Failed to destroy session: {err:#}");
        }
    }

    // Always clear the cookie, even when no session record existed.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(&state) {
        response_headers.insert(SET_COOKIE, cookie);
    }

    (
        StatusCode::OK,
        response_headers,
        Json(AuthOk {
            ok: true,
            redirect: "/login.html".to_string(),
        }),
    )
        .into_response()
}

/// Build the `HttpOnly` session cookie carrying the raw token.
pub(crate) fn session_cookie(
    state: &ApiState,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = state.session_ttl_seconds;
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if state.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(state: &ApiState) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if state.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}
