//! Request/response types for the auth endpoints.

use axum::{
    async_trait,
    extract::{Form, FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestExt,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Credentials posted to `/register` and `/login`.
///
/// The login/register pages post urlencoded forms; API clients send JSON.
/// Both are accepted based on the `Content-Type` header.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[async_trait]
impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(credentials) = req
                .extract::<Form<Self>, _>()
                .await
                .map_err(|_| missing_payload())?;
            return Ok(credentials);
        }

        let Json(credentials) = req
            .extract::<Json<Self>, _>()
            .await
            .map_err(|_| missing_payload())?;
        Ok(credentials)
    }
}

fn missing_payload() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Missing payload".to_string(),
        }),
    )
        .into_response()
}

/// Body returned by register, login, and logout on success.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuthOk {
    pub ok: bool,
    pub redirect: String,
}

/// JSON error payload with a stable, client-safe message.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MeUser {
    pub id: i64,
    pub username: String,
}

/// Identity check result; `user` is present only when authenticated.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<MeUser>,
}
