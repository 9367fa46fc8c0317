//! OpenAPI document served through Swagger UI at `/docs`.

use utoipa::OpenApi;

use crate::api::handlers::{dashboard, health, login, register, session, types};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        register::register,
        login::login,
        session::logout,
        session::me,
        dashboard::dashboard,
    ),
    components(schemas(
        types::Credentials,
        types::AuthOk,
        types::ErrorResponse,
        types::MeUser,
        types::MeResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login, and session management"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
