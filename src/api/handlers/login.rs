//! Login endpoint.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::{
    auth_error_response,
    session::session_cookie,
    types::{AuthOk, Credentials, ErrorResponse},
};
use crate::api::ApiState;

#[utoipa::path(
    post,
    path = "/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials verified and session established", body = AuthOk),
        (status = 400, description = "Missing payload", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(state: Extension<ApiState>, credentials: Credentials) -> Response {
    let new_session = match state
        .gateway
        .login(&credentials.username, &credentials.password)
        .await
    {
        Ok(session) => session,
        Err(err) => return auth_error_response(&err, "Server error during login."),
    };

    let mut headers = HeaderMap::new();
    match session_cookie(&state, &new_session.token) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Server error during login.".to_string(),
                }),
            )
                .into_response();
        }
    }

    (
        StatusCode::OK,
        headers,
        Json(AuthOk {
            ok: true,
            redirect: "/dashboard".to_string(),
        }),
    )
        .into_response()
}
