//! API handlers for the authentication service.

pub mod dashboard;
pub mod health;
pub mod login;
pub mod register;
pub mod session;
pub mod types;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::auth::AuthError;
use types::ErrorResponse;

/// Map a gateway failure to its boundary response.
///
/// Storage faults are logged and replaced with `storage_message`; internal
/// error text never reaches clients.
pub(crate) fn auth_error_response(err: &AuthError, storage_message: &str) -> Response {
    let (status, message) = match err {
        AuthError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
        AuthError::DuplicateUsername => {
            (StatusCode::CONFLICT, "Username already exists.".to_string())
        }
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "Invalid username or password.".to_string(),
        ),
        AuthError::Storage(err) => {
            error!("Storage failure: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                storage_message.to_string(),
            )
        }
    };

    (status, Json(ErrorResponse { error: message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AuthError::Validation("Username must be at least 3 characters.".to_string());
        let response = auth_error_response(&err, "unused");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_maps_to_conflict() {
        let response = auth_error_response(&AuthError::DuplicateUsername, "unused");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_credentials_map_to_unauthorized() {
        let response = auth_error_response(&AuthError::InvalidCredentials, "unused");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn storage_maps_to_internal_error() {
        let err = AuthError::Storage(anyhow::anyhow!("connection reset"));
        let response = auth_error_response(&err, "Server error during login.");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
