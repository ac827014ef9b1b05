//! Session-guard extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use landreg_client::LandRegistryApi;
use landreg_core::guard::{Navigation, RouteGuard, LOGIN_PATH};
use landreg_core::session::{DenyReason, TokenClaims};
use landreg_core::types::now_millis;

use crate::error::AppError;
use crate::session::{RequestSessionStore, CLEAR_COOKIE, SESSION_DENY_HEADER};
use crate::state::AppState;

/// A request whose session token passed the guard.
///
/// Use this as an extractor parameter in any handler behind the login wall.
/// Requests without a usable token are redirected to the login page:
///
/// ```ignore
/// async fn my_view(session: RequireSession) -> AppResult<Json<()>> {
///     tracing::info!(user = ?session.claims.sub, "rendering view");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireSession {
    /// The raw token, forwarded to the backend as a bearer credential.
    pub token: String,
    pub claims: TokenClaims,
}

impl RequireSession {
    /// Backend client authenticated as this session.
    pub fn backend(&self, state: &AppState) -> LandRegistryApi {
        state.backend.authorized(self.token.clone())
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let guard = RouteGuard::new(RequestSessionStore::from_headers(&parts.headers));

        match guard.evaluate(now_millis()) {
            Navigation::Render { claims } => {
                let token = guard.store().current().ok_or_else(|| {
                    AppError::InternalError("session slot emptied during evaluation".into())
                })?;
                Ok(RequireSession { token, claims })
            }
            Navigation::Redirect { reason, .. } => Err(SessionRejection {
                reason: reason.unwrap_or(DenyReason::NoToken),
                clear_cookie: guard.store().was_cleared(),
            }
            .into()),
        }
    }
}

/// Redirect to the login page issued when the guard refuses a request.
#[derive(Debug, thiserror::Error)]
#[error("Session refused: {reason}")]
pub struct SessionRejection {
    pub reason: DenyReason,
    /// Whether the stored token must be deleted (it has expired).
    pub clear_cookie: bool,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let mut response = StatusCode::SEE_OTHER.into_response();
        let headers = response.headers_mut();
        headers.insert(LOCATION, HeaderValue::from_static(LOGIN_PATH));
        headers.insert(
            SESSION_DENY_HEADER,
            HeaderValue::from_static(self.reason.code()),
        );
        if self.clear_cookie {
            headers.insert(SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
        }
        response
    }
}
