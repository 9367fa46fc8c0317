//! Registration endpoint. A successful registration is an implicit login.

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
    path = "/register",
    request_body = Credentials,
    responses(
        (status = 200, description = "Account created and session established", body = AuthOk),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(state: Extension<ApiState>, credentials: Credentials) -> Response {
    let new_session = match state
        .gateway
        .register(&credentials.username, &credentials.password)
        .await
    {
        Ok(session) => session,
        Err(err) => return auth_error_response(&err, "Server error during registration."),
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
                    error: "Server error during registration.".to_string(),
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
