//! The protected page.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use tracing::error;

use super::{session::extract_session_token, types::ErrorResponse};
use crate::{api::ApiState, auth::Access};

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Protected content for the signed-in user"),
        (status = 303, description = "Redirect to the login page when unauthenticated"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn dashboard(headers: HeaderMap, state: Extension<ApiState>) -> Response {
    let token = extract_session_token(&headers);
    match state.gateway.require_session(token.as_deref()).await {
        Ok(Access::Granted(identity)) => Html(format!(
            "<!doctype html>\n<html>\n<body>\n<h1>Dashboard</h1>\n<p>Signed in as {}.</p>\n\
             <form method=\"post\" action=\"/logout\"><button>Log out</button></form>\n\
             </body>\n</html>\n",
            escape_html(&identity.username)
        ))
        .into_response(),
        Ok(Access::RedirectToLogin) => Redirect::to("/login.html").into_response(),
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

// Usernames are unrestricted strings; escape before interpolating into HTML.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
