use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use landreg_client::ApiError;
use landreg_core::error::CoreError;
use landreg_core::types::DbId;
use serde_json::json;
use validator::Validate;

use crate::middleware::auth::SessionRejection;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`ApiError`] for failures of the
/// land-registry backend, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `landreg_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The land-registry backend failed or refused the request.
    #[error("Backend error: {0}")]
    Backend(#[from] ApiError),

    /// The session guard refused the request.
    #[error(transparent)]
    Session(#[from] SessionRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // --- Session guard ---
            AppError::Session(rejection) => return rejection.into_response(),

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            },

            // --- Backend errors ---
            AppError::Backend(err) => classify_backend_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a backend error into an HTTP status, error code, and message.
///
/// - 400, 401, 403 and 404 from the backend pass through.
/// - Everything else maps to 502 with a sanitized message.
fn classify_backend_error(err: &ApiError) -> (StatusCode, &'static str, String) {
    match err {
        ApiError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid username or password".to_string(),
        ),
        ApiError::Api { status: 400, body } => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", body.clone())
        }
        ApiError::Api { status: 401, .. } => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "The backend rejected the session".to_string(),
        ),
        ApiError::Api { status: 403, .. } => (
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "The backend refused this operation".to_string(),
        ),
        ApiError::Api { status: 404, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        ApiError::Api { status: 409, body } => (StatusCode::CONFLICT, "CONFLICT", body.clone()),
        other => {
            tracing::error!(error = %other, "Backend error");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                "The land registry backend is unavailable".to_string(),
            )
        }
    }
}

/// Run `validator` checks on request input.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

/// Map a backend 404 for `entity` `id` to [`CoreError::NotFound`].
pub fn not_found_as(entity: &'static str, id: DbId) -> impl FnOnce(ApiError) -> AppError {
    move |err| match err.status() {
        Some(404) => AppError::Core(CoreError::NotFound { entity, id }),
        _ => AppError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_statuses_are_classified() {
        let api = |status| ApiError::Api {
            status,
            body: "x".into(),
        };
        assert_eq!(classify_backend_error(&api(400)).0, StatusCode::BAD_REQUEST);
        assert_eq!(classify_backend_error(&api(401)).0, StatusCode::UNAUTHORIZED);
        assert_eq!(classify_backend_error(&api(403)).0, StatusCode::FORBIDDEN);
        assert_eq!(classify_backend_error(&api(404)).0, StatusCode::NOT_FOUND);
        assert_eq!(classify_backend_error(&api(409)).0, StatusCode::CONFLICT);
        assert_eq!(classify_backend_error(&api(500)).0, StatusCode::BAD_GATEWAY);
        assert_eq!(
            classify_backend_error(&ApiError::InvalidCredentials).0,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn backend_404_becomes_entity_not_found() {
        let err = not_found_as("land", 7)(ApiError::Api {
            status: 404,
            body: String::new(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_backend_failures_pass_through_entity_mapping() {
        let err = not_found_as("land", 7)(ApiError::Api {
            status: 500,
            body: String::new(),
        });
        assert!(matches!(err, AppError::Backend(ApiError::Api { status: 500, .. })));
    }
}
