//! Route definitions for the session pages.
//!
//! Mounted at the root. Everything except `/dashboard` is public.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET    /                    -> home (session status)
/// GET    /login               -> login_page
/// POST   /login               -> login
/// POST   /register            -> register
/// GET    /oauth2/redirect     -> oauth_redirect
/// POST   /logout              -> logout
/// GET    /dashboard           -> dashboard (session required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", post(auth::register))
        .route("/oauth2/redirect", get(auth::oauth_redirect))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(auth::dashboard))
}
