//! Handlers for signing in and out and for the session landing pages.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use landreg_client::models::Credentials;
use landreg_client::ApiError;
use landreg_core::error::CoreError;
use landreg_core::guard::{
    complete_oauth_redirect, sign_in, sign_out, Navigation, RouteGuard, LOGIN_PATH,
};
use landreg_core::session::DenyReason;
use landreg_core::types::now_millis;
use serde::{Deserialize, Serialize};

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::auth::RequireSession;
use crate::response::DataResponse;
use crate::session::RequestSessionStore;
use crate::state::AppState;

/// Sections linked from the dashboard.
const DASHBOARD_SECTIONS: [&str; 6] = [
    "/api/v1/lands",
    "/api/v1/owners",
    "/api/v1/history",
    "/api/v1/users",
    "/api/v1/notifications",
    "/api/v1/profile/logs",
];

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Session summary returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<String>,
    /// Token expiry (UTC Unix timestamp, seconds).
    pub expires_at: Option<i64>,
    pub reason: Option<DenyReason>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub message: &'static str,
    pub oauth_redirect: &'static str,
}

/// Query string of `GET /oauth2/redirect`.
#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: Option<String>,
    pub expires_at: i64,
    pub sections: [&'static str; 6],
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// Report whether the caller holds a usable session. An expired token is
/// deleted as a side effect.
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let guard = RouteGuard::new(RequestSessionStore::from_headers(&headers));

    let status = match guard.evaluate(now_millis()) {
        Navigation::Render { claims } => SessionStatus {
            authenticated: true,
            expires_at: Some(claims.expires_at()),
            user: claims.sub,
            reason: None,
        },
        Navigation::Redirect { reason, .. } => SessionStatus {
            authenticated: false,
            user: None,
            expires_at: None,
            reason,
        },
    };

    let mut response = Json(DataResponse { data: status }).into_response();
    if let Some(cookie) = guard.store().set_cookie(state.config.cookie_secure)? {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(response)
}

/// GET /login
pub async fn login_page() -> Json<DataResponse<LoginPage>> {
    Json(DataResponse {
        data: LoginPage {
            message: "Sign in to continue",
            oauth_redirect: "/oauth2/redirect",
        },
    })
}

/// POST /login
///
/// Exchange credentials for a backend token and store it in the session
/// cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> AppResult<Response> {
    validate_input(&input)?;

    let token = state.backend.login(&input).await.map_err(|e| match e {
        ApiError::InvalidCredentials => AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )),
        other => AppError::Backend(other),
    })?;

    let store = RequestSessionStore::default();
    let navigation = sign_in(&store, &token);
    tracing::info!(username = %input.username, "User signed in");

    store.navigation_response(navigation, state.config.cookie_secure)
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> AppResult<Redirect> {
    validate_input(&input)?;
    state.backend.register(&input).await?;
    tracing::info!(username = %input.username, "User registered");
    Ok(Redirect::to(LOGIN_PATH))
}

/// GET /oauth2/redirect?token=...
///
/// Finish an OAuth sign-in. Browsers deliver the token in the URL fragment,
/// which the login page forwards here as a query parameter.
pub async fn oauth_redirect(
    State(state): State<AppState>,
    Query(callback): Query<OAuthCallback>,
) -> AppResult<Response> {
    let store = RequestSessionStore::default();
    let navigation = complete_oauth_redirect(&store, callback.token.as_deref().unwrap_or_default());
    store.navigation_response(navigation, state.config.cookie_secure)
}

/// POST /logout
///
/// Notify the backend (best effort) and delete the session cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let store = RequestSessionStore::from_headers(&headers);

    if let Some(token) = store.current() {
        if let Err(e) = state.backend.authorized(token).logout().await {
            tracing::warn!(error = %e, "Backend logout failed");
        }
    }

    let navigation = sign_out(&store);
    store.navigation_response(navigation, state.config.cookie_secure)
}

/// GET /dashboard
pub async fn dashboard(session: RequireSession) -> Json<DataResponse<DashboardView>> {
    Json(DataResponse {
        data: DashboardView {
            expires_at: session.claims.expires_at(),
            user: session.claims.sub,
            sections: DASHBOARD_SECTIONS,
        },
    })
}
